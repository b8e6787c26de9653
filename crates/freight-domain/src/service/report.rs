//! Distribution report

use std::fmt;

use serde::Serialize;

use crate::model::{Client, Company, Vehicle};

/// Line emitted instead of vehicle sections when nothing is loaded
pub const NOT_DISTRIBUTED: &str = "Cargo has not been distributed yet";

const RULE_WIDTH: usize = 50;

/// One client on a vehicle's manifest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestLine {
    pub name: String,
    pub is_vip: bool,
    pub cargo_weight: f64,
}

impl From<&Client> for ManifestLine {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name().to_string(),
            is_vip: client.is_vip(),
            cargo_weight: client.cargo_weight(),
        }
    }
}

/// Report section for a loaded vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSection {
    pub vehicle_id: String,
    pub kind: String,
    pub descriptor: String,
    pub capacity: f64,
    pub current_load: f64,
    pub load_factor_percent: f64,
    pub clients: Vec<ManifestLine>,
}

impl From<&Vehicle> for VehicleSection {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            vehicle_id: vehicle.id().to_string(),
            kind: vehicle.kind_label().to_string(),
            descriptor: vehicle.to_string(),
            capacity: vehicle.capacity(),
            current_load: vehicle.current_load,
            load_factor_percent: vehicle.load_factor(),
            clients: vehicle.manifest.iter().map(ManifestLine::from).collect(),
        }
    }
}

/// Summary of the company's clients and the current vehicle loading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionReport {
    pub company: String,
    pub total_clients: usize,
    pub vip_clients: usize,
    /// Sum over every client, assigned or not
    pub total_cargo: f64,
    pub vip_cargo: f64,
    /// Loaded vehicles in registry order
    pub vehicles: Vec<VehicleSection>,
}

impl DistributionReport {
    pub fn from_company(company: &Company) -> Self {
        let clients = company.list_clients();
        Self {
            company: company.name().to_string(),
            total_clients: clients.len(),
            vip_clients: clients.iter().filter(|c| c.is_vip()).count(),
            total_cargo: clients.iter().map(Client::cargo_weight).sum(),
            vip_cargo: clients
                .iter()
                .filter(|c| c.is_vip())
                .map(Client::cargo_weight)
                .sum(),
            vehicles: company
                .list_vehicles()
                .iter()
                .filter(|v| v.is_loaded())
                .map(VehicleSection::from)
                .collect(),
        }
    }

    /// False when the text form carries the `NOT_DISTRIBUTED` line
    pub fn is_distributed(&self) -> bool {
        !self.vehicles.is_empty()
    }
}

impl fmt::Display for DistributionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Company report '{}':", self.company)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "Total clients: {}", self.total_clients)?;
        writeln!(f, "VIP clients: {}", self.vip_clients)?;
        writeln!(f, "Total cargo weight: {:?}t", self.total_cargo)?;
        writeln!(f, "VIP cargo weight: {:?}t", self.vip_cargo)?;
        writeln!(f)?;

        if !self.is_distributed() {
            return writeln!(f, "{}", NOT_DISTRIBUTED);
        }

        writeln!(f, "Vehicles used:")?;
        for section in &self.vehicles {
            writeln!(f)?;
            writeln!(f, "{}", section.descriptor)?;
            if !section.clients.is_empty() {
                writeln!(f, "  Clients in this vehicle:")?;
                for line in &section.clients {
                    let marker = if line.is_vip { " (VIP)" } else { "" };
                    writeln!(f, "    - {}{}: {:?}t", line.name, marker, line.cargo_weight)?;
                }
            }
            writeln!(f, "  Load factor: {:.1}%", section.load_factor_percent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IdGenerator, SequentialIds};

    fn scenario() -> Company {
        let mut ids = SequentialIds::default();
        let mut company = Company::new("X").unwrap();
        company.add_vehicle(Vehicle::truck(ids.next_id(), 10.0, "red").unwrap());
        company.add_vehicle(Vehicle::train(ids.next_id(), 15.0, 2).unwrap());
        company.add_client(Client::regular("A", 8.0).unwrap());
        company.add_client(Client::vip("B", 5.0).unwrap());
        company.add_client(Client::regular("C", 3.0).unwrap());
        company
    }

    #[test]
    fn test_before_distribution() {
        let company = scenario();
        let report = company.distribution_report();
        assert!(!report.is_distributed());
        assert_eq!(report.total_clients, 3);
        assert_eq!(report.vip_clients, 1);
        assert_eq!(report.total_cargo, 16.0);
        assert_eq!(report.vip_cargo, 5.0);

        let text = report.to_string();
        assert!(text.contains(NOT_DISTRIBUTED));
        assert!(!text.contains("Vehicles used"));
    }

    #[test]
    fn test_after_distribution() {
        let mut company = scenario();
        company.optimize_cargo_distribution();
        let report = company.distribution_report();
        assert!(report.is_distributed());

        // registry order: truck first, then train
        let ids: Vec<_> = report.vehicles.iter().map(|s| s.vehicle_id.as_str()).collect();
        assert_eq!(ids, ["V1", "V2"]);

        let text = company.get_distribution_report();
        assert!(text.starts_with("Company report 'X':\n"));
        assert!(text.contains("Total cargo weight: 16.0t"));
        assert!(text.contains("    - A: 8.0t\n  Load factor: 80.0%"));
        assert!(text.contains("    - B (VIP): 5.0t\n    - C: 3.0t\n"));
        assert!(text.contains("Load factor: 53.3%"));
        assert!(!text.contains(NOT_DISTRIBUTED));
    }

    #[test]
    fn test_unassigned_cargo_still_counted() {
        let mut ids = SequentialIds::default();
        let mut company = Company::new("X").unwrap();
        company.add_vehicle(Vehicle::truck(ids.next_id(), 5.0, "red").unwrap());
        company.add_client(Client::regular("Big", 10.0).unwrap());
        company.optimize_cargo_distribution();

        let report = company.distribution_report();
        assert_eq!(report.total_cargo, 10.0);
        assert!(!report.is_distributed());
    }

    #[test]
    fn test_serializes_to_json() {
        let mut company = scenario();
        company.optimize_cargo_distribution();
        let json = serde_json::to_value(company.distribution_report()).unwrap();
        assert_eq!(json["total_clients"], 3);
        assert_eq!(json["vehicles"][0]["clients"][0]["name"], "A");
        assert_eq!(json["vehicles"][1]["kind"], "Train");
    }
}
