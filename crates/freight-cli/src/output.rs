//! Output formatting module

use freight_domain::{Client, Company, DistributionOutcome, DistributionReport, Vehicle, VehicleKind};
use freight_types::{OutputFormat, Result};
use serde::Serialize;

#[derive(Serialize)]
struct Numbered<'a, T> {
    number: usize,
    #[serde(flatten)]
    item: &'a T,
}

fn vehicle_details(vehicle: &Vehicle) -> String {
    match vehicle.kind() {
        VehicleKind::Truck { color } => format!("color {}", color),
        VehicleKind::Train { car_count } => format!("{} cars", car_count),
    }
}

/// Print clients as (0-based index, client) pairs, numbered from 1
pub fn output_clients(output_format: OutputFormat, clients: &[(usize, &Client)]) -> Result<()> {
    if output_format == OutputFormat::Json {
        let rows: Vec<_> = clients
            .iter()
            .map(|(index, client)| Numbered {
                number: index + 1,
                item: *client,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if clients.is_empty() {
        println!("No clients registered.");
        return Ok(());
    }

    println!("{:>3}  {:<30} {:>10}  {:<7}", "#", "Name", "Cargo(t)", "Status");
    println!("{}", "-".repeat(55));
    for (index, client) in clients {
        println!(
            "{:>3}  {:<30} {:>10}  {:<7}",
            index + 1,
            client.name(),
            client.cargo_weight(),
            client.status_label()
        );
    }
    Ok(())
}

/// Print vehicles as (0-based index, vehicle) pairs, numbered from 1
pub fn output_vehicles(output_format: OutputFormat, vehicles: &[(usize, &Vehicle)]) -> Result<()> {
    if output_format == OutputFormat::Json {
        let rows: Vec<_> = vehicles
            .iter()
            .map(|(index, vehicle)| Numbered {
                number: index + 1,
                item: *vehicle,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if vehicles.is_empty() {
        println!("No vehicles registered.");
        return Ok(());
    }

    println!(
        "{:>3}  {:<10} {:<6} {:>10} {:>10} {:>10}  {}",
        "#", "ID", "Type", "Cap.(t)", "Load(t)", "Free(t)", "Details"
    );
    println!("{}", "-".repeat(70));
    for (index, vehicle) in vehicles {
        println!(
            "{:>3}  {:<10} {:<6} {:>10} {:>10} {:>10}  {}",
            index + 1,
            vehicle.id().as_str(),
            vehicle.kind_label(),
            vehicle.capacity(),
            vehicle.current_load,
            vehicle.free_capacity(),
            vehicle_details(vehicle)
        );
    }
    Ok(())
}

/// Print the vehicles a run used and the clients it could not place
pub fn output_outcome(
    output_format: OutputFormat,
    company: &Company,
    outcome: &DistributionOutcome,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    println!("Cargo distributed.");
    println!("Vehicles used: {}", outcome.active.len());
    for vehicle in company.active_vehicles(outcome) {
        println!("  {}", vehicle);
    }

    if !outcome.unassigned.is_empty() {
        println!();
        println!("Clients without a vehicle: {}", outcome.unassigned.len());
        for client in &outcome.unassigned {
            println!("  {}", client);
        }
    }
    Ok(())
}

pub fn output_report(output_format: OutputFormat, report: &DistributionReport) -> Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Table => println!("{}", report),
    }
    Ok(())
}
