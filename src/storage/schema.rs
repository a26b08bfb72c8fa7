//! Snapshot file connection and schema management

use anyhow::{bail, Context, Result};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::info;

use super::tables::count_table_season_rows;

/// Connection to the SQLite snapshot file
pub struct SnapshotStore {
    pub(crate) conn: Connection,
    pub(crate) path: Option<PathBuf>,
}

impl SnapshotStore {
    /// Open (or create) the snapshot at `path` and ensure `ingest_metadata` exists.
    ///
    /// Missing parent directories are created.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("opening snapshot {}", path.display()))?;
        let mut store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store
            .initialize_schema()
            .with_context(|| format!("initializing snapshot {}", path.display()))?;
        Ok(store)
    }

    /// Open an existing snapshot for reading.
    ///
    /// Nothing is created or migrated, so a mistyped path is an error rather
    /// than a new empty file.
    pub fn open_read_only(path: &Path) -> Result<Self> {
        if !path.is_file() {
            bail!("snapshot {} does not exist", path.display());
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("opening snapshot {}", path.display()))?;
        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };

        if store.has_legacy_metadata()? {
            bail!(
                "snapshot {} uses the legacy metadata layout; run an export to migrate it",
                path.display()
            );
        }
        if !store.table_exists("ingest_metadata")? {
            bail!("{} has no ingest_metadata table", path.display());
        }
        Ok(store)
    }

    /// Create an in-memory store for testing
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn, path: None };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Path of the snapshot file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Initialize the metadata schema, migrating the older layout if present
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        if self.has_legacy_metadata()? {
            self.migrate_legacy_metadata()?;
        }

        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS ingest_metadata (
                dataset TEXT NOT NULL,
                season INTEGER NOT NULL,
                summary_level TEXT,
                refreshed_at TEXT NOT NULL,
                row_count INTEGER NOT NULL,
                PRIMARY KEY (dataset, season)
            );
            CREATE INDEX IF NOT EXISTS idx_ingest_metadata_season
                ON ingest_metadata(season);",
        )?;

        Ok(())
    }

    /// Older snapshots keyed metadata by `table_name` with one appended row
    /// per run and no row counts.
    fn has_legacy_metadata(&self) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM pragma_table_info('ingest_metadata') WHERE name = 'table_name'",
                [],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Collapse legacy metadata to one row per (dataset, season), keeping the
    /// latest run and counting the rows currently stored for it.
    fn migrate_legacy_metadata(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "ALTER TABLE ingest_metadata RENAME TO ingest_metadata_legacy;
            CREATE TABLE ingest_metadata (
                dataset TEXT NOT NULL,
                season INTEGER NOT NULL,
                summary_level TEXT,
                refreshed_at TEXT NOT NULL,
                row_count INTEGER NOT NULL,
                PRIMARY KEY (dataset, season)
            );
            INSERT INTO ingest_metadata (dataset, season, summary_level, refreshed_at, row_count)
            SELECT l.table_name, l.season, l.summary_level, l.ingested_at, 0
            FROM ingest_metadata_legacy l
            WHERE l.ingested_at = (
                SELECT MAX(ingested_at) FROM ingest_metadata_legacy
                WHERE table_name = l.table_name AND season = l.season
            )
            GROUP BY l.table_name, l.season;
            DROP TABLE ingest_metadata_legacy;",
        )?;

        let pairs: Vec<(String, u16)> = {
            let mut stmt = tx.prepare("SELECT dataset, season FROM ingest_metadata")?;
            let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
            rows.collect::<rusqlite::Result<_>>()?
        };
        for (dataset, season) in &pairs {
            let count = count_table_season_rows(&tx, dataset, *season)?;
            tx.execute(
                "UPDATE ingest_metadata SET row_count = ?1 WHERE dataset = ?2 AND season = ?3",
                rusqlite::params![count, dataset, season],
            )?;
        }

        tx.commit()?;
        info!(entries = pairs.len(), "migrated legacy ingest_metadata table");
        Ok(())
    }
}
