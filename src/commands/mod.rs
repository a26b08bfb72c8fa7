//! Command implementations for the nflverse exporter

pub mod export;
pub mod status;
pub mod summary;

pub use export::{handle_export, run_export, ExportParams, ExportRequest, Exporter};
pub use status::handle_status;
pub use summary::{ExportSummary, FailedPair, SkipRecord};
