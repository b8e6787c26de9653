//! Excel export functionality

use freight_domain::{Company, DistributionReport};
use freight_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

/// Export the distribution to an Excel workbook (Summary + Manifest sheets)
pub fn export_report_excel(company: &Company, output_path: &Path) -> Result<()> {
    let report = company.distribution_report();
    if !report.is_distributed() {
        return Err(Error::NotDistributed);
    }

    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, &report)?;

    let manifest_sheet = workbook.add_worksheet();
    write_manifest_sheet(manifest_sheet, &report)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    info!(path = %output_path.display(), "Excel report exported");
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, report: &DistributionReport) -> Result<()> {
    sheet
        .set_name("Summary")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "Cargo Distribution Report", &header_format)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let rows: [(&str, String); 5] = [
        ("Company:", report.company.clone()),
        ("Exported at:", chrono::Utc::now().to_rfc3339()),
        ("Total clients:", report.total_clients.to_string()),
        ("VIP clients:", report.vip_clients.to_string()),
        ("Vehicles used:", report.vehicles.len().to_string()),
    ];
    for (offset, (label, value)) in rows.iter().enumerate() {
        let row = 2 + offset as u32;
        sheet
            .write_string(row, 0, *label)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, value)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    sheet
        .write_string(7, 0, "Total cargo (t):")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(7, 1, report.total_cargo)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(8, 0, "VIP cargo (t):")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(8, 1, report.vip_cargo)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_manifest_sheet(sheet: &mut Worksheet, report: &DistributionReport) -> Result<()> {
    sheet
        .set_name("Manifest")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();
    let headers = [
        "Vehicle ID",
        "Type",
        "Capacity (t)",
        "Load (t)",
        "Load factor (%)",
        "Client",
        "VIP",
        "Cargo (t)",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    let mut row = 1;
    for section in &report.vehicles {
        for line in &section.clients {
            sheet
                .write_string(row, 0, &section.vehicle_id)
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_string(row, 1, &section.kind)
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_number(row, 2, section.capacity)
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_number(row, 3, section.current_load)
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_number(row, 4, (section.load_factor_percent * 10.0).round() / 10.0)
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_string(row, 5, &line.name)
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_string(row, 6, if line.is_vip { "Yes" } else { "No" })
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_number(row, 7, line.cargo_weight)
                .map_err(|e| Error::Excel(e.to_string()))?;
            row += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_domain::{Client, IdGenerator, SequentialIds, Vehicle};
    use tempfile::tempdir;

    #[test]
    fn test_excel_export() {
        let mut ids = SequentialIds::default();
        let mut company = Company::new("X").unwrap();
        company.add_vehicle(Vehicle::train(ids.next_id(), 15.0, 2).unwrap());
        company.add_client(Client::vip("B", 5.0).unwrap());

        let dir = tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        assert!(matches!(
            export_report_excel(&company, &path),
            Err(Error::NotDistributed)
        ));

        company.optimize_cargo_distribution();
        export_report_excel(&company, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
