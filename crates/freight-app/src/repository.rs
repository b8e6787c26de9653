//! Repository adapters for persistence layer

use std::path::PathBuf;

use freight_infra::persistence::FileCompanyRepository;
use freight_types::Result;

use crate::config::Config;

/// Open the file-based company repository at the configured state path
pub fn open_company_repo(config: &Config) -> Result<FileCompanyRepository> {
    let state_path = config.state_path()?;
    Ok(FileCompanyRepository::open(state_path))
}

/// Open the file-based company repository at a custom path
pub fn open_company_repo_at(state_path: PathBuf) -> FileCompanyRepository {
    FileCompanyRepository::open(state_path)
}
