//! Domain services

pub mod distribution;
pub mod report;

pub use distribution::{capacity_order, distribute, priority_order, DistributionOutcome};
pub use report::{DistributionReport, ManifestLine, VehicleSection, NOT_DISTRIBUTED};
