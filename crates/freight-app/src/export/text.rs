//! Plain-text report export

use std::path::Path;

use freight_domain::Company;
use freight_types::{Error, Result};
use tracing::info;

/// Write the distribution report verbatim to `output_path`.
///
/// Fails with `Error::NotDistributed` while no vehicle carries cargo.
pub fn export_report_text(company: &Company, output_path: &Path) -> Result<()> {
    let report = company.distribution_report();
    if !report.is_distributed() {
        return Err(Error::NotDistributed);
    }
    std::fs::write(output_path, report.to_string())?;
    info!(path = %output_path.display(), "Report exported");
    Ok(())
}
