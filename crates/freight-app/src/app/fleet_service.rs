//! Fleet Service - Company Use Cases
//!
//! Loads the company from its repository, applies one or more edits,
//! runs distributions and writes the state back.

use std::path::Path;

use freight_domain::repository::CompanyRepository;
use freight_domain::{
    Client, Company, CompanyRecord, DistributionOutcome, DistributionReport, IdGenerator,
    UnusedIds, Vehicle, VehicleId, VehicleKind,
};
use freight_infra::client_csv::load_clients_from_csv;
use freight_infra::fleet_loader::FleetLoader;
use freight_infra::persistence::FileCompanyRepository;
use freight_types::{Error, Result};
use tracing::{info, warn};

use crate::config::{Config, IdStyle};
use crate::repository::{open_company_repo, open_company_repo_at};

/// Parameters for a new or rebuilt vehicle
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleSpec {
    Truck { capacity: f64, color: String },
    Train { capacity: f64, cars: u32 },
}

impl VehicleSpec {
    fn build(self, id: VehicleId) -> Result<Vehicle> {
        let vehicle = match self {
            VehicleSpec::Truck { capacity, color } => Vehicle::truck(id, capacity, color)?,
            VehicleSpec::Train { capacity, cars } => Vehicle::train(id, capacity, cars)?,
        };
        Ok(vehicle)
    }
}

/// Field changes for an existing client; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientEdit {
    pub name: Option<String>,
    pub cargo_weight: Option<f64>,
    pub is_vip: Option<bool>,
}

/// Company use cases on top of a repository
pub struct FleetService<R: CompanyRepository> {
    repo: R,
    company: Company,
    id_style: IdStyle,
    ids: Box<dyn IdGenerator>,
}

impl FleetService<FileCompanyRepository> {
    /// Open the service on the configured state file
    pub fn open(config: &Config) -> Result<Self> {
        let repo = open_company_repo(config)?;
        Self::with_repository(repo, config)
    }
}

impl<R: CompanyRepository> FleetService<R> {
    /// Load the company from `repo`, or start an empty one named from config
    pub fn with_repository(repo: R, config: &Config) -> Result<Self> {
        let mut bootstrap = config.id_generator(std::iter::empty());
        let company = match repo.load(&config.company_name, bootstrap.as_mut())? {
            Some(company) => company,
            None => {
                info!(company = %config.company_name, "Starting with an empty company");
                Company::new(config.company_name.clone())?
            }
        };
        let ids = config.id_generator(company.vehicles.iter().map(|v| v.id().as_str()));
        Ok(Self {
            repo,
            company,
            id_style: config.id_style,
            ids,
        })
    }

    /// Restart id generation after the vehicle set was replaced or extended
    fn resync_ids(&mut self) {
        self.ids = self
            .id_style
            .generator(self.company.vehicles.iter().map(|v| v.id().as_str()));
    }

    fn registered_ids(&self) -> Vec<VehicleId> {
        self.company.vehicles.iter().map(|v| v.id().clone()).collect()
    }

    pub fn company(&self) -> &Company {
        &self.company
    }

    pub fn company_mut(&mut self) -> &mut Company {
        &mut self.company
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Write the current state to the repository
    pub fn save(&self) -> Result<()> {
        self.repo.save(&self.company)
    }

    pub fn add_client(&mut self, name: &str, cargo_weight: f64, is_vip: bool) -> Result<&Client> {
        let client = Client::new(name.trim(), cargo_weight, is_vip)?;
        info!(client = client.name(), cargo_weight, is_vip, "Client added");
        self.company.add_client(client);
        Ok(&self.company.clients[self.company.clients.len() - 1])
    }

    /// Register a vehicle with a freshly generated id
    pub fn add_vehicle(&mut self, spec: VehicleSpec) -> Result<VehicleId> {
        let taken = self.registered_ids();
        let id = UnusedIds::new(self.ids.as_mut(), taken).next_id();
        let vehicle = spec.build(id)?;
        let id = vehicle.id().clone();
        info!(vehicle = %id, kind = vehicle.kind_label(), "Vehicle added");
        self.company.add_vehicle(vehicle);
        Ok(id)
    }

    /// Apply `edit` to the client at `index`; nothing changes if any field is invalid
    pub fn edit_client(&mut self, index: usize, edit: ClientEdit) -> Result<&Client> {
        let client = self.company.client_mut(index)?;
        let updated = Client::new(
            edit.name.as_deref().map(str::trim).unwrap_or(client.name()),
            edit.cargo_weight.unwrap_or(client.cargo_weight()),
            edit.is_vip.unwrap_or(client.is_vip()),
        )?;
        *client = updated;
        Ok(client)
    }

    /// Rebuild the vehicle at `index` from `spec`, keeping its id.
    ///
    /// The rebuilt vehicle starts empty.
    pub fn edit_vehicle(&mut self, index: usize, spec: VehicleSpec) -> Result<&Vehicle> {
        let id = self.company.vehicle(index)?.id().clone();
        let rebuilt = spec.build(id)?;
        self.company.replace_vehicle(index, rebuilt)?;
        Ok(&self.company.vehicles[index])
    }

    /// Current spec of the vehicle at `index`, for editing only some fields
    pub fn vehicle_spec(&self, index: usize) -> Result<VehicleSpec> {
        let vehicle = self.company.vehicle(index)?;
        Ok(match vehicle.kind() {
            VehicleKind::Truck { color } => VehicleSpec::Truck {
                capacity: vehicle.capacity(),
                color: color.clone(),
            },
            VehicleKind::Train { car_count } => VehicleSpec::Train {
                capacity: vehicle.capacity(),
                cars: *car_count,
            },
        })
    }

    pub fn remove_client(&mut self, index: usize) -> Result<Client> {
        let len = self.company.clients.len();
        self.company
            .remove_client(index)
            .ok_or(Error::IndexOutOfRange {
                kind: "client",
                index,
                len,
            })
    }

    pub fn remove_vehicle(&mut self, index: usize) -> Result<Vehicle> {
        let len = self.company.vehicles.len();
        self.company
            .remove_vehicle(index)
            .ok_or(Error::IndexOutOfRange {
                kind: "vehicle",
                index,
                len,
            })
    }

    /// Run the distribution engine; refuses when there is nothing to pair
    pub fn distribute(&mut self) -> Result<DistributionOutcome> {
        if self.company.vehicles.is_empty() {
            return Err(Error::NothingToDistribute("vehicles"));
        }
        if self.company.clients.is_empty() {
            return Err(Error::NothingToDistribute("clients"));
        }
        let outcome = self.company.optimize_cargo_distribution();
        for client in &outcome.unassigned {
            warn!(client = client.name(), "Client left without a vehicle");
        }
        Ok(outcome)
    }

    pub fn report(&self) -> DistributionReport {
        self.company.distribution_report()
    }

    /// Append vehicles from a TOML fleet file; returns how many were added
    pub fn import_fleet(&mut self, path: &Path) -> Result<usize> {
        let taken = self.registered_ids();
        let mut fresh = UnusedIds::new(self.ids.as_mut(), taken);
        let vehicles = FleetLoader::load_from_file(path)?.into_vehicles(&mut fresh)?;
        let count = vehicles.len();
        for vehicle in vehicles {
            if self.company.find_vehicle(vehicle.id()).is_some() {
                warn!(vehicle = %vehicle.id(), "Imported vehicle id already registered");
            }
            self.company.add_vehicle(vehicle);
        }
        self.resync_ids();
        info!(path = %path.display(), count, "Fleet imported");
        Ok(count)
    }

    /// Append clients from a CSV file; returns how many were added
    pub fn import_clients(&mut self, path: &Path) -> Result<usize> {
        let clients = load_clients_from_csv(path)?;
        let count = clients.len();
        for client in clients {
            self.company.add_client(client);
        }
        info!(path = %path.display(), count, "Clients imported");
        Ok(count)
    }

    /// Write the current state to an arbitrary file
    pub fn save_as(&self, path: &Path) -> Result<()> {
        open_company_repo_at(path.to_path_buf()).save(&self.company)
    }

    /// Replace the current state with the contents of `path`
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let repo = open_company_repo_at(path.to_path_buf());
        let record: CompanyRecord = repo.read_record()?.ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("State file not found: {}", path.display()),
            ))
        })?;
        let company = Company::from_record(record, self.company.name(), self.ids.as_mut())?;
        info!(path = %path.display(), "Opened company state");
        self.company = company;
        self.resync_ids();
        Ok(())
    }

    /// Drop every client and vehicle, keeping the company name
    pub fn reset(&mut self) -> Result<()> {
        self.company = Company::new(self.company.name().to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdStyle;
    use std::cell::RefCell;

    /// In-memory repository for service tests
    #[derive(Default)]
    struct MemoryRepo {
        saved: RefCell<Option<CompanyRecord>>,
    }

    impl CompanyRepository for MemoryRepo {
        fn load(
            &self,
            fallback_name: &str,
            ids: &mut dyn IdGenerator,
        ) -> std::result::Result<Option<Company>, Error> {
            match self.saved.borrow().clone() {
                Some(record) => Ok(Some(Company::from_record(record, fallback_name, ids)?)),
                None => Ok(None),
            }
        }

        fn save(&self, company: &Company) -> std::result::Result<(), Error> {
            *self.saved.borrow_mut() = Some(company.to_record());
            Ok(())
        }
    }

    fn sequential() -> Config {
        Config {
            company_name: "X".to_string(),
            id_style: IdStyle::Sequential,
            ..Config::default()
        }
    }

    fn service() -> FleetService<MemoryRepo> {
        FleetService::with_repository(MemoryRepo::default(), &sequential()).unwrap()
    }

    #[test]
    fn test_starts_empty_with_config_name() {
        let service = service();
        assert_eq!(service.company().name(), "X");
        assert!(service.company().clients.is_empty());
    }

    #[test]
    fn test_add_and_distribute() {
        let mut service = service();
        let truck = service
            .add_vehicle(VehicleSpec::Truck {
                capacity: 10.0,
                color: "red".to_string(),
            })
            .unwrap();
        let train = service
            .add_vehicle(VehicleSpec::Train {
                capacity: 15.0,
                cars: 2,
            })
            .unwrap();
        assert_eq!(truck.as_str(), "V1");
        assert_eq!(train.as_str(), "V2");

        service.add_client("A", 8.0, false).unwrap();
        service.add_client("B", 5.0, true).unwrap();
        service.add_client("C", 3.0, false).unwrap();

        let outcome = service.distribute().unwrap();
        assert_eq!(outcome.active, vec![train, truck]);
        assert!(service.report().is_distributed());
    }

    #[test]
    fn test_distribute_requires_vehicles_and_clients() {
        let mut service = service();
        assert!(matches!(
            service.distribute(),
            Err(Error::NothingToDistribute("vehicles"))
        ));
        service
            .add_vehicle(VehicleSpec::Train {
                capacity: 15.0,
                cars: 2,
            })
            .unwrap();
        assert!(matches!(
            service.distribute(),
            Err(Error::NothingToDistribute("clients"))
        ));
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut service = service();
        assert!(matches!(
            service.add_client(" ", 1.0, false),
            Err(Error::Validation(_))
        ));
        assert!(service
            .add_vehicle(VehicleSpec::Truck {
                capacity: 5.0,
                color: String::new(),
            })
            .is_err());
        assert!(service.company().clients.is_empty());
        assert!(service.company().vehicles.is_empty());
    }

    #[test]
    fn test_edit_client_is_atomic() {
        let mut service = service();
        service.add_client("A", 8.0, false).unwrap();

        let err = service.edit_client(
            0,
            ClientEdit {
                name: Some("Renamed".to_string()),
                cargo_weight: Some(-1.0),
                is_vip: None,
            },
        );
        assert!(err.is_err());
        assert_eq!(service.company().clients[0].name(), "A");

        let edited = service
            .edit_client(
                0,
                ClientEdit {
                    is_vip: Some(true),
                    ..ClientEdit::default()
                },
            )
            .unwrap();
        assert!(edited.is_vip());
        assert_eq!(edited.cargo_weight(), 8.0);
    }

    #[test]
    fn test_edit_vehicle_keeps_id() {
        let mut service = service();
        let id = service
            .add_vehicle(VehicleSpec::Truck {
                capacity: 10.0,
                color: "red".to_string(),
            })
            .unwrap();
        let edited = service
            .edit_vehicle(
                0,
                VehicleSpec::Train {
                    capacity: 20.0,
                    cars: 3,
                },
            )
            .unwrap();
        assert_eq!(edited.id(), &id);
        assert_eq!(edited.kind_label(), "Train");
        assert_eq!(
            service.vehicle_spec(0).unwrap(),
            VehicleSpec::Train {
                capacity: 20.0,
                cars: 3
            }
        );
        assert!(service.edit_vehicle(4, VehicleSpec::Train { capacity: 1.0, cars: 1 }).is_err());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut service = service();
        assert!(matches!(
            service.remove_client(0),
            Err(Error::IndexOutOfRange { kind: "client", .. })
        ));
        assert!(matches!(
            service.remove_vehicle(3),
            Err(Error::IndexOutOfRange { kind: "vehicle", .. })
        ));
    }

    #[test]
    fn test_save_and_reload_continue_ids() {
        let mut service = service();
        service
            .add_vehicle(VehicleSpec::Truck {
                capacity: 10.0,
                color: "red".to_string(),
            })
            .unwrap();
        service.save().unwrap();

        let repo = MemoryRepo {
            saved: RefCell::new(service.repository().saved.borrow().clone()),
        };
        let mut reloaded = FleetService::with_repository(repo, &sequential()).unwrap();
        let next = reloaded
            .add_vehicle(VehicleSpec::Train {
                capacity: 5.0,
                cars: 1,
            })
            .unwrap();
        assert_eq!(next.as_str(), "V2");
    }

    #[test]
    fn test_reset_keeps_name() {
        let mut service = service();
        service.add_client("A", 1.0, false).unwrap();
        service.reset().unwrap();
        assert_eq!(service.company().name(), "X");
        assert!(service.company().clients.is_empty());
    }
}
