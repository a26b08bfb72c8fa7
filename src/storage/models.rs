//! Data models for the storage layer

use crate::cli::types::time::Season;
use serde::{Deserialize, Serialize};

/// One row of `ingest_metadata`: the last successful write of a dataset
/// table for a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Snapshot table name, e.g. `injuries` or `pfr_advstats_pass_week`
    pub dataset: String,
    pub season: Season,
    pub summary_level: Option<String>,
    /// RFC 3339 UTC timestamp of the run that wrote the rows
    pub refreshed_at: String,
    pub row_count: u64,
}
