//! Client entity

use std::fmt;

use freight_types::ValidationError;
use serde::Serialize;

/// A customer with a single consignment to ship
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    name: String,
    /// Cargo weight in tonnes
    cargo_weight: f64,
    is_vip: bool,
}

impl Client {
    /// Create a validated client
    pub fn new(
        name: impl Into<String>,
        cargo_weight: f64,
        is_vip: bool,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        validate_weight(cargo_weight)?;
        Ok(Self {
            name,
            cargo_weight,
            is_vip,
        })
    }

    /// Create a non-VIP client
    pub fn regular(name: impl Into<String>, cargo_weight: f64) -> Result<Self, ValidationError> {
        Self::new(name, cargo_weight, false)
    }

    /// Create a VIP client
    pub fn vip(name: impl Into<String>, cargo_weight: f64) -> Result<Self, ValidationError> {
        Self::new(name, cargo_weight, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cargo_weight(&self) -> f64 {
        self.cargo_weight
    }

    pub fn is_vip(&self) -> bool {
        self.is_vip
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_cargo_weight(&mut self, cargo_weight: f64) -> Result<(), ValidationError> {
        validate_weight(cargo_weight)?;
        self.cargo_weight = cargo_weight;
        Ok(())
    }

    pub fn set_vip(&mut self, is_vip: bool) {
        self.is_vip = is_vip;
    }

    /// Status label used in listings
    pub fn status_label(&self) -> &'static str {
        if self.is_vip {
            "VIP"
        } else {
            "Regular"
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyClientName);
    }
    Ok(())
}

fn validate_weight(cargo_weight: f64) -> Result<(), ValidationError> {
    // NaN fails the comparison and is rejected with the rest
    if !(cargo_weight > 0.0) || !cargo_weight.is_finite() {
        return Err(ValidationError::NonPositiveCargoWeight(cargo_weight));
    }
    Ok(())
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Client: {}, cargo: {:?}t, status: {}",
            self.name,
            self.cargo_weight,
            self.status_label()
        )
    }
}
