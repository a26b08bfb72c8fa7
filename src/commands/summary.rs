//! Outcome of an export run.

use serde::Serialize;
use std::fmt::Write as _;

use crate::{cli::types::dataset::DatasetKind, storage::MetadataEntry, Season};

/// A (season, dataset) pair the provider had no data for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkipRecord {
    pub dataset: String,
    pub kind: DatasetKind,
    pub season: Season,
    pub reason: String,
}

/// A (season, dataset) pair whose fetch or write failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedPair {
    pub dataset: String,
    pub kind: DatasetKind,
    pub season: Season,
    pub error: String,
}

/// Per-pair results of one export run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportSummary {
    /// Timestamp recorded for every pair written by this run
    pub refreshed_at: String,
    pub written: Vec<MetadataEntry>,
    pub skipped: Vec<SkipRecord>,
    pub failed: Vec<FailedPair>,
}

impl ExportSummary {
    pub fn new(refreshed_at: impl Into<String>) -> Self {
        Self {
            refreshed_at: refreshed_at.into(),
            ..Self::default()
        }
    }

    pub fn succeeded_count(&self) -> usize {
        self.written.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn total_rows(&self) -> u64 {
        self.written.iter().map(|e| e.row_count).sum()
    }

    /// Human-readable report printed at the end of a run.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Succeeded: {} ({} rows)  Skipped: {}  Failed: {}",
            self.succeeded_count(),
            self.total_rows(),
            self.skipped_count(),
            self.failed_count()
        );
        for skip in &self.skipped {
            let _ = writeln!(
                out,
                "  - skipped {} {}: {}",
                skip.dataset, skip.season, skip.reason
            );
        }
        for failure in &self.failed {
            let _ = writeln!(
                out,
                "  ✗ failed {} {}: {}",
                failure.dataset, failure.season, failure.error
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExportSummary {
        let mut summary = ExportSummary::new("2025-01-01T00:00:00+00:00");
        summary.written.push(MetadataEntry {
            dataset: "injuries".to_string(),
            season: Season::new(2024),
            summary_level: None,
            refreshed_at: summary.refreshed_at.clone(),
            row_count: 120,
        });
        summary.written.push(MetadataEntry {
            dataset: "rosters".to_string(),
            season: Season::new(2024),
            summary_level: None,
            refreshed_at: summary.refreshed_at.clone(),
            row_count: 3000,
        });
        summary.skipped.push(SkipRecord {
            dataset: "injuries".to_string(),
            kind: DatasetKind::Injuries,
            season: Season::new(2025),
            reason: "injuries/injuries_2025.csv is not published".to_string(),
        });
        summary.failed.push(FailedPair {
            dataset: "rosters".to_string(),
            kind: DatasetKind::Rosters,
            season: Season::new(2025),
            error: "nflverse returned HTTP 503".to_string(),
        });
        summary
    }

    #[test]
    fn test_counts() {
        let summary = sample();
        assert_eq!(summary.succeeded_count(), 2);
        assert_eq!(summary.skipped_count(), 1);
        assert_eq!(summary.failed_count(), 1);
        assert_eq!(summary.total_rows(), 3120);
    }

    #[test]
    fn test_render_text() {
        let text = sample().render_text();
        assert!(text.starts_with("Succeeded: 2 (3120 rows)  Skipped: 1  Failed: 1"));
        assert!(text.contains("skipped injuries 2025: injuries/injuries_2025.csv is not published"));
        assert!(text.contains("failed rosters 2025: nflverse returned HTTP 503"));
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["refreshed_at"], "2025-01-01T00:00:00+00:00");
        assert_eq!(value["written"][0]["dataset"], "injuries");
        assert_eq!(value["written"][0]["season"], 2024);
        assert_eq!(value["skipped"][0]["kind"], "injuries");
        assert_eq!(value["failed"][0]["kind"], "rosters");
    }
}
