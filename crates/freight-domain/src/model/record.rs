//! Serializable records for saving and restoring a company
//!
//! Field names follow the state file layout:
//! `clients: [{name, cargo_weight_t, is_vip}]`,
//! `vehicles: [{type, capacity, color | cars, id, manifest?}]`.
//! The optional manifest keeps the last distribution across restarts.

use chrono::{DateTime, Utc};
use freight_types::{Error, Result, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::Client;
use super::company::Company;
use super::id::{IdGenerator, UnusedIds};
use super::vehicle::{Vehicle, VehicleId, VehicleKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub name: String,
    #[serde(alias = "cargo_weight")]
    pub cargo_weight_t: f64,
    #[serde(default)]
    pub is_vip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub capacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "car_count")]
    pub cars: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manifest: Vec<ClientRecord>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clients: Vec<ClientRecord>,
    #[serde(default)]
    pub vehicles: Vec<VehicleRecord>,
}

impl From<&Client> for ClientRecord {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name().to_string(),
            cargo_weight_t: client.cargo_weight(),
            is_vip: client.is_vip(),
        }
    }
}

impl TryFrom<ClientRecord> for Client {
    type Error = ValidationError;

    fn try_from(record: ClientRecord) -> std::result::Result<Self, Self::Error> {
        Client::new(record.name, record.cargo_weight_t, record.is_vip)
    }
}

impl From<&Vehicle> for VehicleRecord {
    fn from(vehicle: &Vehicle) -> Self {
        let (color, cars) = match vehicle.kind() {
            VehicleKind::Truck { color } => (Some(color.clone()), None),
            VehicleKind::Train { car_count } => (None, Some(i64::from(*car_count))),
        };
        Self {
            kind: vehicle.kind().tag().to_string(),
            capacity: vehicle.capacity(),
            color,
            cars,
            id: Some(vehicle.id().to_string()),
            manifest: vehicle.manifest.iter().map(ClientRecord::from).collect(),
        }
    }
}

impl VehicleRecord {
    /// Rebuild the vehicle, keeping the stored id.
    ///
    /// A record without an id gets a fresh one from `ids`. A train record
    /// without a car count gets one car; a truck without a color fails
    /// validation. A stored manifest is loaded back and must still fit.
    pub fn into_vehicle(self, ids: &mut dyn IdGenerator) -> Result<Vehicle> {
        let id = match self.id {
            Some(id) => VehicleId::new(id)?,
            None => ids.next_id(),
        };
        let kind = match self.kind.trim().to_lowercase().as_str() {
            "truck" => VehicleKind::Truck {
                color: self.color.unwrap_or_default(),
            },
            "train" => {
                let cars = self.cars.unwrap_or(1);
                let car_count = u32::try_from(cars)
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or(ValidationError::NonPositiveCarCount(cars))?;
                VehicleKind::Train { car_count }
            }
            other => {
                return Err(Error::TypeMismatch {
                    expected: "vehicle type 'truck' or 'train'".to_string(),
                    found: format!("'{}'", other),
                })
            }
        };
        let mut vehicle = Vehicle::new(id, self.capacity, kind)?;
        for entry in self.manifest {
            let client = Client::try_from(entry)?;
            vehicle.load_cargo(&client)?;
        }
        Ok(vehicle)
    }
}

/// Valid ids carried by `records`
pub fn stored_ids(records: &[VehicleRecord]) -> Vec<VehicleId> {
    records
        .iter()
        .filter_map(|r| r.id.as_deref())
        .filter_map(|id| VehicleId::new(id).ok())
        .collect()
}

impl Company {
    /// Snapshot clients and vehicles for persistence
    pub fn to_record(&self) -> CompanyRecord {
        CompanyRecord {
            name: Some(self.name().to_string()),
            saved_at: Some(Utc::now()),
            clients: self.clients.iter().map(ClientRecord::from).collect(),
            vehicles: self.vehicles.iter().map(VehicleRecord::from).collect(),
        }
    }

    /// Rebuild a company from records
    ///
    /// `fallback_name` is used when the record carries no company name.
    pub fn from_record(
        record: CompanyRecord,
        fallback_name: &str,
        ids: &mut dyn IdGenerator,
    ) -> Result<Self> {
        let name = record
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| fallback_name.to_string());
        let mut company = Company::new(name)?;

        for client in record.clients {
            company.add_client(Client::try_from(client)?);
        }
        // Generated ids must not collide with ids stored later in the file
        let stored = stored_ids(&record.vehicles);
        let mut fresh = UnusedIds::new(ids, stored);
        for vehicle in record.vehicles {
            company.add_vehicle(vehicle.into_vehicle(&mut fresh)?);
        }

        debug!(
            clients = company.clients.len(),
            vehicles = company.vehicles.len(),
            "Restored company from record"
        );
        Ok(company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SequentialIds;

    fn sample() -> Company {
        let mut ids = SequentialIds::new("K");
        let mut company = Company::new("X").unwrap();
        company.add_vehicle(Vehicle::truck(ids.next_id(), 10.0, "red").unwrap());
        company.add_vehicle(Vehicle::train(ids.next_id(), 15.0, 2).unwrap());
        company.add_client(Client::regular("A", 8.0).unwrap());
        company.add_client(Client::vip("B", 5.0).unwrap());
        company
    }

    #[test]
    fn test_record_preserves_ids_and_order() {
        let company = sample();
        let record = company.to_record();
        let mut ids = SequentialIds::new("NEW");
        let restored = Company::from_record(record, "fallback", &mut ids).unwrap();

        assert_eq!(restored.name(), "X");
        assert_eq!(restored.clients, company.clients);
        assert_eq!(restored.vehicles, company.vehicles);
        assert_eq!(restored.vehicles[0].id().as_str(), "K1");
    }

    #[test]
    fn test_state_file_layout() {
        let json = serde_json::to_value(sample().to_record()).unwrap();
        assert_eq!(json["clients"][1]["cargo_weight_t"], 5.0);
        assert_eq!(json["clients"][1]["is_vip"], true);
        assert_eq!(json["vehicles"][0]["type"], "truck");
        assert_eq!(json["vehicles"][0]["color"], "red");
        assert_eq!(json["vehicles"][1]["cars"], 2);
        assert_eq!(json["vehicles"][1]["id"], "K2");
        assert!(json["vehicles"][1].get("color").is_none());
        assert!(json["vehicles"][1].get("manifest").is_none());
    }

    #[test]
    fn test_manifest_survives_round_trip() {
        let mut company = sample();
        company.add_client(Client::regular("C", 3.0).unwrap());
        company.optimize_cargo_distribution();

        let record = company.to_record();
        let restored =
            Company::from_record(record, "X", &mut SequentialIds::default()).unwrap();
        assert_eq!(restored.vehicles, company.vehicles);
        assert_eq!(restored.get_distribution_report(), company.get_distribution_report());
    }

    #[test]
    fn test_manifest_over_capacity_is_overload() {
        let record = VehicleRecord {
            kind: "truck".to_string(),
            capacity: 5.0,
            color: Some("red".to_string()),
            cars: None,
            id: None,
            manifest: vec![ClientRecord {
                name: "Heavy".to_string(),
                cargo_weight_t: 6.0,
                is_vip: false,
            }],
        };
        let err = record.into_vehicle(&mut SequentialIds::default()).unwrap_err();
        assert!(matches!(err, Error::Overload(_)));
    }

    #[test]
    fn test_missing_fields_defaults() {
        let json = r#"{
            "clients": [{"name": "A", "cargo_weight": 2.5}],
            "vehicles": [{"type": "train", "capacity": 20}]
        }"#;
        let record: CompanyRecord = serde_json::from_str(json).unwrap();
        let mut ids = SequentialIds::new("G");
        let company = Company::from_record(record, "Fallback", &mut ids).unwrap();

        assert_eq!(company.name(), "Fallback");
        assert!(!company.clients[0].is_vip());
        assert_eq!(company.vehicles[0].id().as_str(), "G1");
        assert_eq!(
            company.vehicles[0].kind(),
            &VehicleKind::Train { car_count: 1 }
        );
    }

    #[test]
    fn test_truck_without_color_fails() {
        let record = VehicleRecord {
            kind: "truck".to_string(),
            capacity: 5.0,
            color: None,
            cars: None,
            id: Some("abc".to_string()),
            manifest: Vec::new(),
        };
        let err = record.into_vehicle(&mut SequentialIds::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyColor)));
    }

    #[test]
    fn test_unknown_type_is_type_mismatch() {
        let record = VehicleRecord {
            kind: "bus".to_string(),
            capacity: 5.0,
            color: None,
            cars: None,
            id: None,
            manifest: Vec::new(),
        };
        let err = record.into_vehicle(&mut SequentialIds::default()).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_negative_cars_rejected() {
        let record = VehicleRecord {
            kind: "Train".to_string(),
            capacity: 5.0,
            color: None,
            cars: Some(-3),
            id: None,
            manifest: Vec::new(),
        };
        let err = record.into_vehicle(&mut SequentialIds::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NonPositiveCarCount(-3))
        ));
    }

    #[test]
    fn test_invalid_client_record_rejected() {
        let record = CompanyRecord {
            clients: vec![ClientRecord {
                name: "A".to_string(),
                cargo_weight_t: 0.0,
                is_vip: false,
            }],
            ..Default::default()
        };
        let result = Company::from_record(record, "X", &mut SequentialIds::default());
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_generated_ids_avoid_stored_ids() {
        let truck = |id: Option<&str>| VehicleRecord {
            kind: "truck".to_string(),
            capacity: 10.0,
            color: Some("red".to_string()),
            cars: None,
            id: id.map(str::to_string),
            manifest: Vec::new(),
        };
        let record = CompanyRecord {
            vehicles: vec![truck(None), truck(Some("V1")), truck(None)],
            ..Default::default()
        };
        let company = Company::from_record(record, "X", &mut SequentialIds::default()).unwrap();
        let ids: Vec<_> = company.vehicles.iter().map(|v| v.id().as_str()).collect();
        assert_eq!(ids, ["V2", "V1", "V3"]);
    }
}
