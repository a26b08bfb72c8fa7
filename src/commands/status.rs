//! Status command: list what the snapshot currently holds.

use std::fmt::Write as _;
use std::path::Path;

use crate::{storage::MetadataEntry, storage::SnapshotStore, Result, Season};

/// Render metadata rows as an aligned table.
pub fn render_status(entries: &[MetadataEntry]) -> String {
    if entries.is_empty() {
        return "No datasets recorded yet.\n".to_string();
    }

    let width = entries
        .iter()
        .map(|e| e.dataset.len())
        .max()
        .unwrap_or(0)
        .max("DATASET".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:<6}  {:<8}  {:>8}  {}",
        "DATASET",
        "SEASON",
        "SUMMARY",
        "ROWS",
        "REFRESHED AT",
        width = width
    );
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<width$}  {:<6}  {:<8}  {:>8}  {}",
            entry.dataset,
            entry.season,
            entry.summary_level.as_deref().unwrap_or("-"),
            entry.row_count,
            entry.refreshed_at,
            width = width
        );
    }
    out
}

/// Handle the status command. The snapshot must already exist.
pub fn handle_status(seasons: &[Season], db_path: &Path, as_json: bool) -> Result<()> {
    let store = SnapshotStore::open_read_only(db_path)?;
    let entries = store.list_metadata(seasons)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", render_status(&entries));
    }

    Ok(())
}
