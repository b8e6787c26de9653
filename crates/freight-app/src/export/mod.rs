//! Report export

pub mod excel;
pub mod text;

pub use excel::export_report_excel;
pub use text::export_report_text;
