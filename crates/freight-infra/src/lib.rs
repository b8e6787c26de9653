//! Infrastructure layer
//!
//! Concrete implementations of domain interfaces: the JSON state file
//! repository and the fleet/client import loaders.

pub mod client_csv;
pub mod fleet_loader;
pub mod persistence;
