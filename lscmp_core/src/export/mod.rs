#[cfg(feature = "csv-export")]
mod csv;
#[cfg(feature = "xlsx-export")]
mod xlsx;

#[cfg(feature = "csv-export")]
pub use csv::CsvExporter;
#[cfg(feature = "xlsx-export")]
pub use xlsx::{XlsxExporter, DEFAULT_MATCHED_COLOR, DEFAULT_MISSING_COLOR};

use std::path::{Path, PathBuf};

/// Spreadsheet formats a comparison can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

/// Detect the export format from a file name, case-insensitively.
pub fn detect_export_format(path: &Path) -> Option<ExportFormat> {
    let name = path.file_name()?.to_string_lossy().to_lowercase();
    if name.ends_with(".xlsx") {
        Some(ExportFormat::Xlsx)
    } else if name.ends_with(".csv") {
        Some(ExportFormat::Csv)
    } else {
        None
    }
}

/// Resolve the path and format an export should use. Paths without a
/// recognized extension get ".xlsx" appended rather than replaced, so
/// "report.v2" becomes "report.v2.xlsx".
pub fn resolve_export_path(path: &Path) -> (PathBuf, ExportFormat) {
    if let Some(format) = detect_export_format(path) {
        return (path.to_path_buf(), format);
    }

    let mut with_ext = path.as_os_str().to_os_string();
    with_ext.push(".xlsx");
    (PathBuf::from(with_ext), ExportFormat::Xlsx)
}
