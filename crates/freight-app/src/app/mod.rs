//! Application use cases

pub mod fleet_service;

pub use fleet_service::{ClientEdit, FleetService, VehicleSpec};
