//! File-based company repository implementation

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use freight_domain::repository::CompanyRepository;
use freight_domain::{Company, CompanyRecord, IdGenerator};
use freight_types::{Error, Result};
use tracing::info;

/// File-based implementation of CompanyRepository
///
/// Stores clients and vehicles in a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct FileCompanyRepository {
    state_path: PathBuf,
}

impl FileCompanyRepository {
    /// Use the state file at `state_path`; it is created on first save
    pub fn open(state_path: PathBuf) -> Self {
        Self { state_path }
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Read the raw record, if the file exists
    pub fn read_record(&self) -> Result<Option<CompanyRecord>> {
        if !self.state_path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.state_path)?;
        let reader = BufReader::new(file);
        let record = serde_json::from_reader(reader)?;
        Ok(Some(record))
    }

    /// Write a record, creating parent directories as needed
    pub fn write_record(&self, record: &CompanyRecord) -> Result<()> {
        if let Some(parent) = self.state_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(&self.state_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, record)?;
        Ok(())
    }

    /// Delete the state file; returns whether one existed
    pub fn clear(&self) -> Result<bool> {
        if self.state_path.exists() {
            fs::remove_file(&self.state_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

impl CompanyRepository for FileCompanyRepository {
    fn load(
        &self,
        fallback_name: &str,
        ids: &mut dyn IdGenerator,
    ) -> std::result::Result<Option<Company>, Error> {
        match self.read_record()? {
            Some(record) => {
                let company = Company::from_record(record, fallback_name, ids)?;
                info!(
                    path = %self.state_path.display(),
                    clients = company.clients.len(),
                    vehicles = company.vehicles.len(),
                    "Loaded company state"
                );
                Ok(Some(company))
            }
            None => Ok(None),
        }
    }

    fn save(&self, company: &Company) -> std::result::Result<(), Error> {
        self.write_record(&company.to_record())?;
        info!(path = %self.state_path.display(), "Saved company state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_domain::{Client, SequentialIds, Vehicle};
    use tempfile::tempdir;

    fn sample(ids: &mut SequentialIds) -> Company {
        let mut company = Company::new("Fast Delivery").unwrap();
        company.add_vehicle(Vehicle::truck(ids.next_id(), 10.0, "red").unwrap());
        company.add_vehicle(Vehicle::train(ids.next_id(), 15.0, 2).unwrap());
        company.add_client(Client::vip("B", 5.0).unwrap());
        company
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let repo = FileCompanyRepository::open(dir.path().join("state.json"));
        let loaded = repo.load("X", &mut SequentialIds::default()).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let repo = FileCompanyRepository::open(dir.path().join("nested").join("state.json"));
        let mut ids = SequentialIds::new("S");
        let company = sample(&mut ids);

        repo.save(&company).unwrap();
        assert!(repo.state_path().exists());

        let loaded = repo
            .load("X", &mut SequentialIds::new("OTHER"))
            .unwrap()
            .unwrap();
        assert_eq!(loaded, company);
        assert_eq!(loaded.vehicles[1].id().as_str(), "S2");
    }

    #[test]
    fn test_loads_hand_written_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{
  "clients": [
    {"name": "Ivan", "cargo_weight_t": 1.5, "is_vip": true}
  ],
  "vehicles": [
    {"type": "truck", "capacity": 3.0, "color": "blue", "id": "a1b2c3d4"}
  ]
}"#,
        )
        .unwrap();

        let repo = FileCompanyRepository::open(path);
        let company = repo
            .load("Fast Delivery", &mut SequentialIds::default())
            .unwrap()
            .unwrap();
        assert_eq!(company.name(), "Fast Delivery");
        assert_eq!(company.vehicles[0].id().as_str(), "a1b2c3d4");
        assert!(company.clients[0].is_vip());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        let repo = FileCompanyRepository::open(path);
        assert!(matches!(
            repo.load("X", &mut SequentialIds::default()),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let repo = FileCompanyRepository::open(dir.path().join("state.json"));
        assert!(!repo.clear().unwrap());
        repo.save(&Company::new("X").unwrap()).unwrap();
        assert!(repo.clear().unwrap());
        assert!(!repo.state_path().exists());
    }
}
