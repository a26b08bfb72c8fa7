//! The `ingest_metadata` recorder

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{models::MetadataEntry, schema::SnapshotStore};
use crate::cli::types::time::Season;

/// Insert or overwrite the row keyed by (dataset, season). Last write wins.
pub(crate) fn upsert_metadata(conn: &Connection, entry: &MetadataEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO ingest_metadata (dataset, season, summary_level, refreshed_at, row_count)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(dataset, season) DO UPDATE SET
             summary_level = excluded.summary_level,
             refreshed_at = excluded.refreshed_at,
             row_count = excluded.row_count",
        params![
            entry.dataset,
            entry.season.as_u16(),
            entry.summary_level,
            entry.refreshed_at,
            entry.row_count
        ],
    )?;
    Ok(())
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<MetadataEntry> {
    Ok(MetadataEntry {
        dataset: row.get(0)?,
        season: Season::new(row.get(1)?),
        summary_level: row.get(2)?,
        refreshed_at: row.get(3)?,
        row_count: row.get(4)?,
    })
}

impl SnapshotStore {
    /// Record a completed dataset/season write
    pub fn record_metadata(&mut self, entry: &MetadataEntry) -> Result<()> {
        upsert_metadata(&self.conn, entry)
    }

    /// Get the metadata row for one dataset and season
    pub fn metadata_entry(&self, dataset: &str, season: Season) -> Result<Option<MetadataEntry>> {
        let entry = self
            .conn
            .query_row(
                "SELECT dataset, season, summary_level, refreshed_at, row_count
                 FROM ingest_metadata
                 WHERE dataset = ?1 AND season = ?2",
                params![dataset, season.as_u16()],
                row_to_entry,
            )
            .optional()?;
        Ok(entry)
    }

    /// List metadata rows ordered by dataset then season.
    /// An empty `seasons` filter returns every row.
    pub fn list_metadata(&self, seasons: &[Season]) -> Result<Vec<MetadataEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT dataset, season, summary_level, refreshed_at, row_count
             FROM ingest_metadata
             ORDER BY dataset, season",
        )?;

        let rows = stmt.query_map([], row_to_entry)?;

        let mut entries = Vec::new();
        for row in rows {
            let entry = row?;
            if seasons.is_empty() || seasons.contains(&entry.season) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    /// Total number of metadata rows
    pub fn metadata_count(&self) -> Result<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM ingest_metadata", [], |row| row.get(0))?;
        Ok(count)
    }
}
