//! Domain model types

pub mod client;
pub mod company;
pub mod id;
pub mod record;
pub mod vehicle;

pub use client::Client;
pub use company::Company;
pub use id::{IdGenerator, RandomIds, SequentialIds, UnusedIds};
pub use record::{ClientRecord, CompanyRecord, VehicleRecord};
pub use vehicle::{Vehicle, VehicleId, VehicleKind};
