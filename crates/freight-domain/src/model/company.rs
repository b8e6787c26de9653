//! Company registry holding clients and vehicles in insertion order

use freight_types::{Error, Result, ValidationError};
use serde::Serialize;

use super::client::Client;
use super::vehicle::{Vehicle, VehicleId};
use crate::service::distribution::{self, DistributionOutcome};
use crate::service::report::DistributionReport;

/// Transport company: the aggregate that owns every client and vehicle
///
/// The collections are public so shells can remove or reorder entries
/// directly. Removing entries does not touch manifests of other vehicles;
/// the next distribution run rebuilds them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Company {
    name: String,
    pub clients: Vec<Client>,
    pub vehicles: Vec<Vehicle>,
}

impl Company {
    pub fn new(name: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyCompanyName);
        }
        Ok(Self {
            name,
            clients: Vec::new(),
            vehicles: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) -> std::result::Result<(), ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyCompanyName);
        }
        self.name = name;
        Ok(())
    }

    pub fn add_client(&mut self, client: Client) {
        self.clients.push(client);
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }

    pub fn list_vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn list_clients(&self) -> &[Client] {
        &self.clients
    }

    /// Remove the client at `index`, if any
    pub fn remove_client(&mut self, index: usize) -> Option<Client> {
        (index < self.clients.len()).then(|| self.clients.remove(index))
    }

    /// Remove the vehicle at `index`, if any
    pub fn remove_vehicle(&mut self, index: usize) -> Option<Vehicle> {
        (index < self.vehicles.len()).then(|| self.vehicles.remove(index))
    }

    pub fn client_mut(&mut self, index: usize) -> Result<&mut Client> {
        let len = self.clients.len();
        self.clients.get_mut(index).ok_or(Error::IndexOutOfRange {
            kind: "client",
            index,
            len,
        })
    }

    pub fn vehicle(&self, index: usize) -> Result<&Vehicle> {
        self.vehicles.get(index).ok_or(Error::IndexOutOfRange {
            kind: "vehicle",
            index,
            len: self.vehicles.len(),
        })
    }

    /// Swap in a rebuilt vehicle at `index`, returning the old one.
    ///
    /// The caller builds `replacement` with the old vehicle's id so the
    /// identity survives the edit.
    pub fn replace_vehicle(&mut self, index: usize, replacement: Vehicle) -> Result<Vehicle> {
        let len = self.vehicles.len();
        let slot = self.vehicles.get_mut(index).ok_or(Error::IndexOutOfRange {
            kind: "vehicle",
            index,
            len,
        })?;
        Ok(std::mem::replace(slot, replacement))
    }

    pub fn find_vehicle(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    /// Clients whose name contains `text`, case-insensitively, with their positions
    pub fn filter_clients(&self, text: &str) -> Vec<(usize, &Client)> {
        let needle = text.trim().to_lowercase();
        self.clients
            .iter()
            .enumerate()
            .filter(|(_, c)| needle.is_empty() || c.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Vehicles whose id or type label contains `text`, case-insensitively
    pub fn filter_vehicles(&self, text: &str) -> Vec<(usize, &Vehicle)> {
        let needle = text.trim().to_lowercase();
        self.vehicles
            .iter()
            .enumerate()
            .filter(|(_, v)| {
                needle.is_empty()
                    || v.id().as_str().to_lowercase().contains(&needle)
                    || v.kind_label().to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn total_cargo(&self) -> f64 {
        self.clients.iter().map(Client::cargo_weight).sum()
    }

    /// Assign every client's cargo to vehicles, discarding the previous run
    pub fn optimize_cargo_distribution(&mut self) -> DistributionOutcome {
        distribution::distribute(&self.clients, &mut self.vehicles)
    }

    /// Vehicles named by `outcome`, in activation order
    pub fn active_vehicles<'a>(&'a self, outcome: &DistributionOutcome) -> Vec<&'a Vehicle> {
        outcome
            .active
            .iter()
            .filter_map(|id| self.find_vehicle(id))
            .collect()
    }

    pub fn distribution_report(&self) -> DistributionReport {
        DistributionReport::from_company(self)
    }

    /// Text report of the current distribution
    pub fn get_distribution_report(&self) -> String {
        self.distribution_report().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::id::{IdGenerator, SequentialIds};

    fn sample() -> Company {
        let mut ids = SequentialIds::default();
        let mut company = Company::new("X").unwrap();
        company.add_vehicle(Vehicle::truck(ids.next_id(), 10.0, "red").unwrap());
        company.add_vehicle(Vehicle::train(ids.next_id(), 15.0, 2).unwrap());
        company.add_client(Client::regular("Alice", 8.0).unwrap());
        company.add_client(Client::vip("Bob", 5.0).unwrap());
        company
    }

    #[test]
    fn test_blank_company_name_rejected() {
        assert_eq!(Company::new(" "), Err(ValidationError::EmptyCompanyName));
        let mut company = Company::new("X").unwrap();
        assert!(company.rename("").is_err());
        assert_eq!(company.name(), "X");
    }

    #[test]
    fn test_insertion_order_kept() {
        let company = sample();
        let names: Vec<_> = company.list_clients().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Alice", "Bob"]);
        let ids: Vec<_> = company.list_vehicles().iter().map(|v| v.id().as_str()).collect();
        assert_eq!(ids, ["V1", "V2"]);
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut company = Company::new("X").unwrap();
        let client = Client::regular("Alice", 1.0).unwrap();
        company.add_client(client.clone());
        company.add_client(client);
        assert_eq!(company.list_clients().len(), 2);
    }

    #[test]
    fn test_remove_by_index() {
        let mut company = sample();
        assert_eq!(company.remove_client(5), None);
        let removed = company.remove_client(0).unwrap();
        assert_eq!(removed.name(), "Alice");
        assert_eq!(company.clients.len(), 1);
        assert!(company.remove_vehicle(1).is_some());
        assert_eq!(company.vehicles.len(), 1);
    }

    #[test]
    fn test_replace_vehicle_keeps_position() {
        let mut company = sample();
        let old_id = company.vehicles[0].id().clone();
        let rebuilt = Vehicle::train(old_id.clone(), 30.0, 4).unwrap();
        let old = company.replace_vehicle(0, rebuilt).unwrap();
        assert_eq!(old.kind_label(), "Truck");
        assert_eq!(company.vehicles[0].id(), &old_id);
        assert_eq!(company.vehicles[0].capacity(), 30.0);

        let err = company
            .replace_vehicle(9, Vehicle::train(old_id, 1.0, 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 9, len: 2, .. }));
    }

    #[test]
    fn test_client_mut_out_of_range() {
        let mut company = sample();
        assert!(company.client_mut(1).is_ok());
        assert!(matches!(
            company.client_mut(2),
            Err(Error::IndexOutOfRange { kind: "client", .. })
        ));
    }

    #[test]
    fn test_filters() {
        let company = sample();
        let found: Vec<_> = company.filter_clients("BO").into_iter().map(|(i, _)| i).collect();
        assert_eq!(found, [1]);
        assert_eq!(company.filter_clients("").len(), 2);

        let trains: Vec<_> = company.filter_vehicles("train").into_iter().map(|(i, _)| i).collect();
        assert_eq!(trains, [1]);
        let by_id: Vec<_> = company.filter_vehicles("v1").into_iter().map(|(i, _)| i).collect();
        assert_eq!(by_id, [0]);
    }

    #[test]
    fn test_total_cargo() {
        assert_eq!(sample().total_cargo(), 13.0);
    }
}
