//! Export command: fetch nflverse datasets and upsert them into the snapshot.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tracing::{error, warn};

use super::summary::{ExportSummary, FailedPair, SkipRecord};
use crate::{
    cli::types::{dataset::DatasetKind, levels::Aggregation, time::Season},
    error::ExportError,
    nflverse::{DataSource, FetchOutcome, NflverseClient},
    storage::{SnapshotStore, TableWrite},
    Result,
};

/// What to export: seasons × dataset kinds at one aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub seasons: Vec<Season>,
    /// Empty means every dataset kind
    pub datasets: Vec<DatasetKind>,
    pub aggregation: Aggregation,
}

impl ExportRequest {
    /// Validate seasons against `current` and put seasons and datasets in
    /// canonical order without duplicates.
    pub fn normalized(&self, current: Season) -> Result<Self> {
        if self.seasons.is_empty() {
            return Err(ExportError::NoSeasons);
        }
        let seasons = self
            .seasons
            .iter()
            .map(|s| s.validate(current))
            .collect::<Result<BTreeSet<_>>>()?
            .into_iter()
            .collect();

        Ok(Self {
            seasons,
            datasets: DatasetKind::normalize(&self.datasets),
            aggregation: self.aggregation,
        })
    }
}

/// Parameters for the export command
#[derive(Debug, Clone)]
pub struct ExportParams {
    pub seasons: Vec<Season>,
    pub datasets: Vec<DatasetKind>,
    pub aggregation: Aggregation,
    pub db_path: PathBuf,
    pub base_url: String,
    pub timeout: Duration,
    pub as_json: bool,
}

/// Runs one export against a data source and an open snapshot store.
pub struct Exporter<'a, S: DataSource> {
    source: &'a S,
    store: &'a mut SnapshotStore,
}

impl<'a, S: DataSource> Exporter<'a, S> {
    pub fn new(source: &'a S, store: &'a mut SnapshotStore) -> Self {
        Self { source, store }
    }

    /// Export every pair in `request`, stamping writes with the current time.
    ///
    /// `request` is expected to be normalized.
    pub async fn export(&mut self, request: &ExportRequest) -> ExportSummary {
        let timestamp = Utc::now().to_rfc3339();
        self.export_at(request, &timestamp).await
    }

    /// Export every pair in `request`, stamping writes with `timestamp`.
    ///
    /// Never fails as a whole: unavailable pairs are skipped and failing
    /// pairs are recorded, then the run moves on.
    pub async fn export_at(&mut self, request: &ExportRequest, timestamp: &str) -> ExportSummary {
        let mut summary = ExportSummary::new(timestamp);
        let aggregation = request.aggregation;

        for &season in &request.seasons {
            println!("\n=== Exporting season {} ===", season);

            for &kind in &request.datasets {
                let table = kind.table_name(aggregation.advstats);

                let mut frame = match self.source.fetch(kind, season, aggregation).await {
                    Ok(FetchOutcome::Rows(frame)) => frame,
                    Ok(FetchOutcome::NotAvailable { reason }) => {
                        warn!("{} unavailable for {} ({}). Skipping.", kind, season, reason);
                        summary.skipped.push(SkipRecord {
                            dataset: table,
                            kind,
                            season,
                            reason,
                        });
                        continue;
                    }
                    Err(e) => {
                        error!("Failed to fetch {} for {}: {}", kind, season, e);
                        summary.failed.push(FailedPair {
                            dataset: table,
                            kind,
                            season,
                            error: e.to_string(),
                        });
                        continue;
                    }
                };

                frame.ensure_season(season);

                let write = TableWrite {
                    table: &table,
                    season,
                    frame: &frame,
                    index_columns: kind.index_columns(),
                    summary_level: kind.summary_level(&aggregation),
                    refreshed_at: timestamp,
                };
                match self.store.replace_season(&write) {
                    Ok(entry) => {
                        println!("✓ {} ({} rows)", table, entry.row_count);
                        summary.written.push(entry);
                    }
                    Err(e) => {
                        error!("Failed to write {} for {}: {:#}", table, season, e);
                        summary.failed.push(FailedPair {
                            dataset: table.clone(),
                            kind,
                            season,
                            error: format!("{:#}", e),
                        });
                    }
                }
            }
        }

        summary
    }
}

/// Validate the request, open the snapshot, and run the export.
///
/// Invalid input and a snapshot that cannot be opened are fatal and
/// returned before anything is fetched. Per-pair problems are reported in
/// the summary instead.
pub async fn run_export<S: DataSource>(
    source: &S,
    db_path: &Path,
    request: &ExportRequest,
) -> Result<ExportSummary> {
    let request = request.normalized(Season::current())?;
    let mut store = SnapshotStore::open(db_path)?;
    Ok(Exporter::new(source, &mut store).export(&request).await)
}

/// Handle the export command
pub async fn handle_export(params: ExportParams) -> Result<()> {
    let seasons = if params.seasons.is_empty() {
        vec![Season::current()]
    } else {
        params.seasons
    };
    let request = ExportRequest {
        seasons,
        datasets: params.datasets,
        aggregation: params.aggregation,
    };

    let source = NflverseClient::new(params.base_url, params.timeout)?;
    let summary = run_export(&source, &params.db_path, &request).await?;

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        print!("{}", summary.render_text());
        println!("Done. Updated tables stored in {}", params.db_path.display());
    }

    Ok(())
}
