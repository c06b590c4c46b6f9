pub mod compare;
pub mod export;
pub mod listing;

pub use compare::compare;
pub use export::{ExportFormat, detect_export_format, resolve_export_path};
pub use listing::DirectoryLister;

#[cfg(feature = "csv-export")]
pub use export::CsvExporter;
#[cfg(feature = "xlsx-export")]
pub use export::{DEFAULT_MATCHED_COLOR, DEFAULT_MISSING_COLOR, XlsxExporter};
