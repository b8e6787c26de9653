//! Domain layer for freight-planner
//!
//! Entities (clients, vehicles, the company registry), the greedy cargo
//! distribution engine and the distribution report.

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::CompanyRepository;
pub use service::{DistributionOutcome, DistributionReport, NOT_DISTRIBUTED};
