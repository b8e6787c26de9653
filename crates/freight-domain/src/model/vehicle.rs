//! Vehicle entity and its variants

use std::fmt;

use freight_types::{OverloadError, ValidationError};
use serde::Serialize;

use super::client::Client;

/// Short identifier assigned to a vehicle when it is created
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    /// Wrap an externally supplied id (e.g. read back from a state file)
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyVehicleId);
        }
        Ok(Self(id))
    }

    pub(crate) fn from_generated(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variant-specific vehicle data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VehicleKind {
    Truck { color: String },
    Train { car_count: u32 },
}

impl VehicleKind {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::Truck { .. } => "Truck",
            VehicleKind::Train { .. } => "Train",
        }
    }

    /// Record tag used by the persistence format
    pub fn tag(&self) -> &'static str {
        match self {
            VehicleKind::Truck { .. } => "truck",
            VehicleKind::Train { .. } => "train",
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            VehicleKind::Truck { color } if color.trim().is_empty() => {
                Err(ValidationError::EmptyColor)
            }
            VehicleKind::Train { car_count: 0 } => Err(ValidationError::NonPositiveCarCount(0)),
            _ => Ok(()),
        }
    }
}

/// A truck or train that carries client cargo
///
/// `current_load` and `manifest` are rebuilt by every distribution run.
/// They stay public so the distribution engine can reset them in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    id: VehicleId,
    /// Capacity in tonnes
    capacity: f64,
    kind: VehicleKind,
    pub current_load: f64,
    pub manifest: Vec<Client>,
}

impl Vehicle {
    /// Create a validated vehicle of any kind
    pub fn new(id: VehicleId, capacity: f64, kind: VehicleKind) -> Result<Self, ValidationError> {
        validate_capacity(capacity)?;
        kind.validate()?;
        Ok(Self {
            id,
            capacity,
            kind,
            current_load: 0.0,
            manifest: Vec::new(),
        })
    }

    pub fn truck(
        id: VehicleId,
        capacity: f64,
        color: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(id, capacity, VehicleKind::Truck { color: color.into() })
    }

    pub fn train(id: VehicleId, capacity: f64, car_count: u32) -> Result<Self, ValidationError> {
        Self::new(id, capacity, VehicleKind::Train { car_count })
    }

    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn kind(&self) -> &VehicleKind {
        &self.kind
    }

    pub fn kind_label(&self) -> &'static str {
        self.kind.label()
    }

    /// Whether `cargo_weight` still fits. Exact comparison, no tolerance.
    pub fn can_load(&self, cargo_weight: f64) -> bool {
        self.current_load + cargo_weight <= self.capacity
    }

    /// Put a client's cargo on board
    pub fn load_cargo(&mut self, client: &Client) -> Result<(), OverloadError> {
        if !self.can_load(client.cargo_weight()) {
            return Err(OverloadError {
                current_load: self.current_load,
                cargo_weight: client.cargo_weight(),
                capacity: self.capacity,
            });
        }
        self.current_load += client.cargo_weight();
        self.manifest.push(client.clone());
        Ok(())
    }

    /// Empty the vehicle before a new distribution run
    pub fn reset(&mut self) {
        self.current_load = 0.0;
        self.manifest.clear();
    }

    pub fn free_capacity(&self) -> f64 {
        self.capacity - self.current_load
    }

    /// Current load as a percentage of capacity
    pub fn load_factor(&self) -> f64 {
        self.current_load / self.capacity * 100.0
    }

    pub fn is_loaded(&self) -> bool {
        self.current_load > 0.0
    }
}

fn validate_capacity(capacity: f64) -> Result<(), ValidationError> {
    if !(capacity > 0.0) || !capacity.is_finite() {
        return Err(ValidationError::NonPositiveCapacity(capacity));
    }
    Ok(())
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle ID: {}, capacity: {:?}t, current load: {:?}t, free: {:?}t, type: {}",
            self.id,
            self.capacity,
            self.current_load,
            self.free_capacity(),
            self.kind.label()
        )?;
        match &self.kind {
            VehicleKind::Truck { color } => write!(f, ", color: {}", color),
            VehicleKind::Train { car_count } => write!(f, ", cars: {}", car_count),
        }
    }
}
