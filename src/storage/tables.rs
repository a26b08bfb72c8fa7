//! Per-season replacement of dataset tables

use anyhow::{bail, Context, Result};
use rusqlite::{params, params_from_iter, Connection};
use std::collections::HashSet;

use super::{metadata::upsert_metadata, models::MetadataEntry, schema::SnapshotStore};
use crate::cli::types::time::Season;
use crate::nflverse::frame::{Frame, SEASON_COLUMN};

/// Quote an SQLite identifier.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Column names of `table`, empty if the table does not exist.
pub(crate) fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let rows = stmt.query_map([table], |row| row.get::<_, String>(0))?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}

/// Rows stored for `season` in `table`, 0 if the table does not exist.
pub(crate) fn count_table_season_rows(conn: &Connection, table: &str, season: u16) -> Result<u64> {
    let columns = table_columns(conn, table)?;
    if !columns.iter().any(|c| c.eq_ignore_ascii_case(SEASON_COLUMN)) {
        return Ok(0);
    }
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE season = ?1",
        quote_ident(table)
    );
    Ok(conn.query_row(&sql, params![season], |row| row.get(0))?)
}

/// One dataset/season payload to be written.
#[derive(Debug, Clone, Copy)]
pub struct TableWrite<'a> {
    pub table: &'a str,
    pub season: Season,
    pub frame: &'a Frame,
    /// Preferred lookup index; falls back to `(season)` when a column is absent
    pub index_columns: &'a [&'a str],
    pub summary_level: Option<&'a str>,
    pub refreshed_at: &'a str,
}

impl SnapshotStore {
    pub fn table_exists(&self, table: &str) -> Result<bool> {
        Ok(!table_columns(&self.conn, table)?.is_empty())
    }

    pub fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        table_columns(&self.conn, table)
    }

    pub fn count_season_rows(&self, table: &str, season: Season) -> Result<u64> {
        count_table_season_rows(&self.conn, table, season.as_u16())
    }

    /// Replace `season`'s rows in the target table with the frame and record
    /// the write in `ingest_metadata`, all in one transaction.
    ///
    /// The table is created from the frame on first write. Columns that appear
    /// in later payloads are added; columns a payload lacks are left NULL.
    /// On error nothing is changed.
    pub fn replace_season(&mut self, write: &TableWrite<'_>) -> Result<MetadataEntry> {
        let frame = write.frame;
        let Some(season_idx) = frame.column_index(SEASON_COLUMN) else {
            bail!("payload for {} has no season column", write.table);
        };
        // Every row must carry the requested season; a row with no season
        // could not be replaced by a later export, so it fails the write too.
        for (i, row) in frame.rows().iter().enumerate() {
            match row[season_idx].as_season() {
                Some(season) if season == write.season.as_u16() => {}
                Some(_) => bail!(
                    "payload for {} contains rows outside season {}",
                    write.table,
                    write.season
                ),
                None => bail!(
                    "payload for {} has no season on row {}",
                    write.table,
                    i + 1
                ),
            }
        }

        let table = quote_ident(write.table);
        let tx = self.conn.transaction()?;

        let existing: HashSet<String> = table_columns(&tx, write.table)?
            .into_iter()
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if existing.is_empty() {
            let defs: Vec<String> = frame
                .columns()
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{} {}", quote_ident(c), frame.affinity(i).as_sql()))
                .collect();
            tx.execute(&format!("CREATE TABLE {} ({})", table, defs.join(", ")), [])
                .with_context(|| format!("creating table {}", write.table))?;
        } else {
            for (i, column) in frame.columns().iter().enumerate() {
                if !existing.contains(&column.to_ascii_lowercase()) {
                    tx.execute(
                        &format!(
                            "ALTER TABLE {} ADD COLUMN {} {}",
                            table,
                            quote_ident(column),
                            frame.affinity(i).as_sql()
                        ),
                        [],
                    )
                    .with_context(|| format!("adding column {} to {}", column, write.table))?;
                }
            }
        }

        tx.execute(
            &format!("DELETE FROM {} WHERE season = ?1", table),
            params![write.season.as_u16()],
        )?;

        {
            let columns: Vec<String> = frame.columns().iter().map(|c| quote_ident(c)).collect();
            let placeholders = vec!["?"; columns.len()].join(", ");
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table,
                columns.join(", "),
                placeholders
            ))?;
            for row in frame.rows() {
                stmt.execute(params_from_iter(row.iter()))
                    .with_context(|| format!("inserting into {}", write.table))?;
            }
        }

        let present: HashSet<String> = table_columns(&tx, write.table)?
            .into_iter()
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let index_columns: Vec<&str> = if write
            .index_columns
            .iter()
            .all(|c| present.contains(&c.to_ascii_lowercase()))
        {
            write.index_columns.to_vec()
        } else {
            vec![SEASON_COLUMN]
        };
        tx.execute(
            &format!(
                "CREATE INDEX IF NOT EXISTS {} ON {}({})",
                quote_ident(&format!("idx_{}_{}", write.table, index_columns.join("_"))),
                table,
                index_columns
                    .iter()
                    .map(|c| quote_ident(c))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            [],
        )?;

        let entry = MetadataEntry {
            dataset: write.table.to_string(),
            season: write.season,
            summary_level: write.summary_level.map(str::to_string),
            refreshed_at: write.refreshed_at.to_string(),
            row_count: frame.len() as u64,
        };
        upsert_metadata(&tx, &entry)?;

        tx.commit()?;
        Ok(entry)
    }
}
