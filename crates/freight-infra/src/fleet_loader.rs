//! Fleet loader from TOML files
//!
//! ```toml
//! [[vehicles]]
//! type = "truck"
//! capacity = 10.0
//! color = "red"
//!
//! [[vehicles]]
//! type = "train"
//! capacity = 40.0
//! cars = 4
//! id = "north-1"
//! ```

use std::fs;
use std::path::Path;

use freight_domain::model::record::stored_ids;
use freight_domain::{IdGenerator, UnusedIds, Vehicle, VehicleRecord};
use freight_types::{ConfigError, Error, Result};
use serde::Deserialize;

/// Container for parsing a fleet TOML file
#[derive(Debug, Deserialize)]
struct FleetFile {
    #[serde(default)]
    vehicles: Vec<VehicleRecord>,
}

/// Vehicles parsed from a fleet file, in file order
#[derive(Debug)]
pub struct FleetLoader {
    records: Vec<VehicleRecord>,
}

impl FleetLoader {
    /// Load fleet data from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read fleet file {}: {}",
                path.display(),
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load fleet data from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let fleet: FleetFile = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse fleet TOML: {}",
                e
            )))
        })?;

        Ok(Self {
            records: fleet.vehicles,
        })
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Build validated vehicles; ids missing from the file come from `ids`
    ///
    /// Generated ids skip the ids written in the file.
    pub fn into_vehicles(self, ids: &mut dyn IdGenerator) -> Result<Vec<Vehicle>> {
        let mut fresh = UnusedIds::new(ids, stored_ids(&self.records));
        self.records
            .into_iter()
            .map(|record| record.into_vehicle(&mut fresh))
            .collect()
    }
}
