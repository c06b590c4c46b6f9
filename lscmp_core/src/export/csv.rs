use csv::Writer;
use lscmp_common::{LscmpError, MatchStatus, NameEntry};
use std::path::Path;
use tracing::debug;

/// Writes a comparison as a four-column CSV: left name, left status, right
/// name, right status. Rows past the end of the shorter side are padded with
/// empty fields.
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(
        &self,
        path: &Path,
        left: &[NameEntry],
        right: &[NameEntry],
    ) -> Result<(), LscmpError> {
        let mut writer = Writer::from_path(path)
            .map_err(|e| LscmpError::Export(format!("Failed to create CSV file: {}", e)))?;

        writer
            .write_record(["left", "left_status", "right", "right_status"])
            .map_err(|e| LscmpError::Export(format!("Failed to write CSV header: {}", e)))?;

        let rows = left.len().max(right.len());
        for i in 0..rows {
            let (left_name, left_status) = field_pair(left.get(i));
            let (right_name, right_status) = field_pair(right.get(i));
            writer
                .write_record([left_name, left_status, right_name, right_status])
                .map_err(|e| LscmpError::Export(format!("Failed to write CSV row: {}", e)))?;
        }

        writer.flush()?;
        debug!("Wrote {} rows to {:?}", rows, path);
        Ok(())
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn field_pair(entry: Option<&NameEntry>) -> (&str, &str) {
    match entry {
        Some(e) => (e.name.as_str(), status_label(e.status)),
        None => ("", ""),
    }
}

fn status_label(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Matched => "matched",
        MatchStatus::Missing => "missing",
    }
}
