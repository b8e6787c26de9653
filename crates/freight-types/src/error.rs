//! Error types for freight-planner

use thiserror::Error;

/// Field validation failures raised when building or editing entities
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Client name must be a non-empty string")]
    EmptyClientName,

    #[error("Cargo weight must be a positive number, got {0}")]
    NonPositiveCargoWeight(f64),

    #[error("Capacity must be a positive number, got {0}")]
    NonPositiveCapacity(f64),

    #[error("Truck color must be a non-empty string")]
    EmptyColor,

    #[error("Number of cars must be a positive integer, got {0}")]
    NonPositiveCarCount(i64),

    #[error("Company name must be a non-empty string")]
    EmptyCompanyName,

    #[error("Vehicle id must be a non-empty string")]
    EmptyVehicleId,
}

/// Raised when cargo is loaded past a vehicle's capacity
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Overload! Current load: {current_load}t, client cargo: {cargo_weight}t, maximum: {capacity}t")]
pub struct OverloadError {
    pub current_load: f64,
    pub cargo_weight: f64,
    pub capacity: f64,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Overload(#[from] OverloadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("No {kind} at position {index} (have {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Cargo has not been distributed yet, nothing to export")]
    NotDistributed,

    #[error("Nothing to distribute: no {0} registered")]
    NothingToDistribute(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
