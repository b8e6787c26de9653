//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod file_company_repo;

pub use file_company_repo::FileCompanyRepository;
