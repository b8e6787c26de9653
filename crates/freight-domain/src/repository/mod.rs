//! Repository trait definitions for data persistence

use freight_types::Error;

use crate::model::{Company, IdGenerator};

/// Storage for the company state between runs
pub trait CompanyRepository {
    /// Load the saved company, or `None` if nothing has been saved yet
    ///
    /// `fallback_name` names the company when the saved state has no name.
    /// Vehicles saved without an id get one from `ids`.
    fn load(&self, fallback_name: &str, ids: &mut dyn IdGenerator)
        -> Result<Option<Company>, Error>;

    /// Save the company, replacing any previous state
    fn save(&self, company: &Company) -> Result<(), Error>;
}
