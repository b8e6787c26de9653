//! Interactive console menu
//!
//! Reads choices line by line; end of input behaves like "0".

use std::io::{BufRead, Write};

use freight_app::app::{FleetService, VehicleSpec};
use freight_domain::CompanyRepository;
use freight_types::{Error, Result};

/// Print `prompt` and read one trimmed line; `None` at end of input
pub fn ask(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

/// Run the menu until "0" or end of input, then save the state
pub fn run_menu<R: CompanyRepository>(
    service: &mut FleetService<R>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    loop {
        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(50))?;
        writeln!(out, "TRANSPORT COMPANY MENU")?;
        writeln!(out, "{}", "=".repeat(50))?;
        writeln!(out, "1. Add vehicle")?;
        writeln!(out, "2. Add client")?;
        writeln!(out, "3. Show all vehicles")?;
        writeln!(out, "4. Show all clients")?;
        writeln!(out, "5. Distribute cargo")?;
        writeln!(out, "6. Show distribution report")?;
        writeln!(out, "0. Exit")?;

        let Some(choice) = ask(input, out, "\nChoose an action: ")? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                if let Err(e) = add_vehicle(service, input, out) {
                    writeln!(out, "Error: {}", e)?;
                }
            }
            "2" => {
                if let Err(e) = add_client(service, input, out) {
                    writeln!(out, "Error: {}", e)?;
                }
            }
            "3" => {
                writeln!(out, "\nAll vehicles:")?;
                let vehicles = service.company().list_vehicles();
                if vehicles.is_empty() {
                    writeln!(out, "No vehicles registered")?;
                }
                for (i, vehicle) in vehicles.iter().enumerate() {
                    writeln!(out, "{}. {}", i + 1, vehicle)?;
                }
            }
            "4" => {
                writeln!(out, "\nAll clients:")?;
                let clients = service.company().list_clients();
                if clients.is_empty() {
                    writeln!(out, "No clients registered")?;
                }
                for (i, client) in clients.iter().enumerate() {
                    writeln!(out, "{}. {}", i + 1, client)?;
                }
            }
            "5" => match service.distribute() {
                Ok(outcome) => {
                    writeln!(
                        out,
                        "Distribution complete! Vehicles used: {}",
                        outcome.active.len()
                    )?;
                    for client in &outcome.unassigned {
                        writeln!(out, "No vehicle could take {}", client)?;
                    }
                }
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            "6" => writeln!(out, "{}", service.company().get_distribution_report())?,
            "0" => break,
            _ => writeln!(out, "Invalid choice. Try again.")?,
        }
    }

    service.save()?;
    writeln!(out, "State saved. Goodbye!")?;
    Ok(())
}

fn parse_number<T: std::str::FromStr>(text: &str, what: &str) -> Result<T> {
    text.trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("{} must be a number, got '{}'", what, text)))
}

fn add_vehicle<R: CompanyRepository>(
    service: &mut FleetService<R>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "\nAdd vehicle:")?;
    writeln!(out, "1. Truck")?;
    writeln!(out, "2. Train")?;
    let kind = ask(input, out, "Vehicle type: ")?.unwrap_or_default();
    if kind != "1" && kind != "2" {
        writeln!(out, "Invalid vehicle type!")?;
        return Ok(());
    }

    let capacity = ask(input, out, "Capacity (t): ")?.unwrap_or_default();
    let capacity: f64 = parse_number(&capacity, "Capacity")?;
    let spec = if kind == "1" {
        let color = ask(input, out, "Truck color: ")?.unwrap_or_default();
        VehicleSpec::Truck { capacity, color }
    } else {
        let cars = ask(input, out, "Number of cars: ")?.unwrap_or_default();
        VehicleSpec::Train {
            capacity,
            cars: parse_number(&cars, "Number of cars")?,
        }
    };

    let id = service.add_vehicle(spec)?;
    writeln!(out, "Vehicle added! ID: {}", id)?;
    Ok(())
}

fn add_client<R: CompanyRepository>(
    service: &mut FleetService<R>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "\nAdd client:")?;
    let name = ask(input, out, "Client name: ")?.unwrap_or_default();
    let weight = ask(input, out, "Cargo weight (t): ")?.unwrap_or_default();
    let weight: f64 = parse_number(&weight, "Cargo weight")?;
    let vip = ask(input, out, "VIP client? (yes/no): ")?.unwrap_or_default();

    let client = service.add_client(&name, weight, is_yes(&vip))?;
    writeln!(out, "Client {} added!", client.name())?;
    Ok(())
}
