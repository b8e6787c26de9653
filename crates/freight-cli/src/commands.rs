//! Command handlers

use crate::cli::{Cli, Commands, OutputFormat};
use crate::menu::{ask, run_menu};
use crate::output::{output_clients, output_outcome, output_report, output_vehicles};
use freight_app::app::{ClientEdit, FleetService, VehicleSpec};
use freight_app::config::{Config, IdStyle};
use freight_app::export::{export_report_excel, export_report_text};
use freight_domain::CompanyRepository;
use freight_types::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref state) = cli.state {
        config.state_file = Some(state.clone());
    }

    crate::logging::init(&config.log_level, cli.verbose);
    let output_format = cli.format.unwrap_or(config.output_format);
    log_resolved_config(&config, output_format);

    match cli.command {
        Commands::Config {
            show,
            set_company,
            set_output,
            set_state_file,
            set_id_style,
            set_log_level,
            reset,
        } => cmd_config(
            show,
            set_company,
            set_output,
            set_state_file,
            set_id_style,
            set_log_level,
            reset,
        ),

        command => {
            let mut service = FleetService::open(&config)?;
            run_fleet_command(&mut service, command, output_format)
        }
    }
}

fn log_resolved_config(config: &Config, output_format: OutputFormat) {
    debug!(
        company = %config.company_name,
        state = ?config.state_path().ok(),
        id_style = %config.id_style,
        format = %output_format,
        "Resolved configuration"
    );
}

/// Convert a 1-based list number into an index
fn position(number: usize, kind: &'static str, len: usize) -> Result<usize> {
    if number == 0 || number > len {
        return Err(Error::IndexOutOfRange {
            kind,
            index: number,
            len,
        });
    }
    Ok(number - 1)
}

/// Dispatch a command that works on the company state, saving after changes
fn run_fleet_command<R: CompanyRepository>(
    service: &mut FleetService<R>,
    command: Commands,
    output_format: OutputFormat,
) -> Result<()> {
    match command {
        Commands::AddClient { name, weight, vip } => {
            let client = service.add_client(&name, weight, vip)?;
            println!("Client added: {}", client);
            service.save()
        }

        Commands::AddTruck { capacity, color } => {
            let id = service.add_vehicle(VehicleSpec::Truck { capacity, color })?;
            println!("Truck added. ID: {}", id);
            service.save()
        }

        Commands::AddTrain { capacity, cars } => {
            let id = service.add_vehicle(VehicleSpec::Train { capacity, cars })?;
            println!("Train added. ID: {}", id);
            service.save()
        }

        Commands::EditClient {
            number,
            name,
            weight,
            vip,
        } => {
            let index = position(number, "client", service.company().clients.len())?;
            let edit = ClientEdit {
                name,
                cargo_weight: weight,
                is_vip: vip,
            };
            let client = service.edit_client(index, edit)?;
            println!("Client updated: {}", client);
            service.save()
        }

        Commands::EditVehicle {
            number,
            capacity,
            color,
            cars,
        } => {
            let index = position(number, "vehicle", service.company().vehicles.len())?;
            let spec = apply_vehicle_edit(service.vehicle_spec(index)?, capacity, color, cars)?;
            let vehicle = service.edit_vehicle(index, spec)?;
            println!("Vehicle updated: {}", vehicle);
            service.save()
        }

        Commands::RemoveClient { number } => {
            let index = position(number, "client", service.company().clients.len())?;
            let client = service.remove_client(index)?;
            println!("Client removed: {}", client.name());
            service.save()
        }

        Commands::RemoveVehicle { number } => {
            let index = position(number, "vehicle", service.company().vehicles.len())?;
            let vehicle = service.remove_vehicle(index)?;
            println!("Vehicle removed: {}", vehicle.id());
            service.save()
        }

        Commands::Clients { filter } => {
            let company = service.company();
            let rows = company.filter_clients(filter.as_deref().unwrap_or(""));
            output_clients(output_format, &rows)
        }

        Commands::Vehicles { filter } => {
            let company = service.company();
            let rows = company.filter_vehicles(filter.as_deref().unwrap_or(""));
            output_vehicles(output_format, &rows)
        }

        Commands::Distribute => {
            let outcome = service.distribute()?;
            service.save()?;
            output_outcome(output_format, service.company(), &outcome)
        }

        Commands::Report { output, excel } => cmd_report(service, output, excel, output_format),

        Commands::ImportFleet { file } => {
            let count = service.import_fleet(&file)?;
            println!("Imported {} vehicles from {}", count, file.display());
            service.save()
        }

        Commands::ImportClients { file } => {
            let count = service.import_clients(&file)?;
            println!("Imported {} clients from {}", count, file.display());
            service.save()
        }

        Commands::SaveAs { file } => {
            service.save_as(&file)?;
            println!("State saved to {}", file.display());
            Ok(())
        }

        Commands::Open { file } => {
            service.open_file(&file)?;
            service.save()?;
            let company = service.company();
            println!(
                "Opened {}: {} clients, {} vehicles",
                file.display(),
                company.clients.len(),
                company.vehicles.len()
            );
            Ok(())
        }

        Commands::Reset { yes } => {
            if !yes {
                let stdin = std::io::stdin();
                let answer = ask(
                    &mut stdin.lock(),
                    &mut std::io::stdout(),
                    "Remove every client and vehicle? [y/N] ",
                )?
                .unwrap_or_default();
                if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
                    println!("Cancelled");
                    return Ok(());
                }
            }
            service.reset()?;
            service.save()?;
            println!("All clients and vehicles removed");
            Ok(())
        }

        Commands::Menu => {
            let stdin = std::io::stdin();
            run_menu(service, &mut stdin.lock(), &mut std::io::stdout())
        }

        Commands::Config { .. } => unreachable!("config is handled before opening the state"),
    }
}

/// Overlay the given fields on a vehicle's current spec
fn apply_vehicle_edit(
    current: VehicleSpec,
    capacity: Option<f64>,
    color: Option<String>,
    cars: Option<u32>,
) -> Result<VehicleSpec> {
    match current {
        VehicleSpec::Truck {
            capacity: old_capacity,
            color: old_color,
        } => {
            if cars.is_some() {
                return Err(Error::TypeMismatch {
                    expected: "train".to_string(),
                    found: "truck".to_string(),
                });
            }
            Ok(VehicleSpec::Truck {
                capacity: capacity.unwrap_or(old_capacity),
                color: color.unwrap_or(old_color),
            })
        }
        VehicleSpec::Train {
            capacity: old_capacity,
            cars: old_cars,
        } => {
            if color.is_some() {
                return Err(Error::TypeMismatch {
                    expected: "truck".to_string(),
                    found: "train".to_string(),
                });
            }
            Ok(VehicleSpec::Train {
                capacity: capacity.unwrap_or(old_capacity),
                cars: cars.unwrap_or(old_cars),
            })
        }
    }
}

fn cmd_report<R: CompanyRepository>(
    service: &FleetService<R>,
    output: Option<PathBuf>,
    excel: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<()> {
    output_report(output_format, &service.report())?;

    if let Some(path) = output {
        export_report_text(service.company(), &path)?;
        eprintln!("Report written to {}", path.display());
    }
    if let Some(path) = excel {
        export_report_excel(service.company(), &path)?;
        eprintln!("Excel report written to {}", path.display());
    }
    Ok(())
}

fn cmd_config(
    show: bool,
    set_company: Option<String>,
    set_output: Option<OutputFormat>,
    set_state_file: Option<PathBuf>,
    set_id_style: Option<IdStyle>,
    set_log_level: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(company) = set_company {
        let company = company.trim().to_string();
        if company.is_empty() {
            return Err(freight_types::ValidationError::EmptyCompanyName.into());
        }
        config.company_name = company;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(state_file) = set_state_file {
        config.state_file = Some(state_file);
        modified = true;
    }

    if let Some(id_style) = set_id_style {
        config.id_style = id_style;
        modified = true;
    }

    if let Some(log_level) = set_log_level {
        config.log_level = log_level;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
