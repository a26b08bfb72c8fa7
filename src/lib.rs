//! nflverse SQLite exporter library
//!
//! Pulls NFL statistics published by the nflverse project and persists them
//! into a local SQLite snapshot, one table per dataset, with an
//! `ingest_metadata` table recording when each (dataset, season) pair was
//! last refreshed.
//!
//! ## Features
//!
//! - **Season-scoped upserts**: re-exporting a season replaces only that season's rows
//! - **Partial-failure tolerance**: unpublished feeds are skipped, failing pairs are
//!   reported, and the run carries on
//! - **Schema drift**: new columns in upstream payloads are added to existing tables
//! - **Refresh bookkeeping**: one metadata row per (dataset, season), last write wins
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nflverse_sqlite::{
//!     commands::{run_export, ExportRequest},
//!     nflverse::NflverseClient,
//!     Aggregation, DatasetKind, Season, DEFAULT_BASE_URL,
//! };
//! use std::{path::Path, time::Duration};
//!
//! # async fn example() -> nflverse_sqlite::Result<()> {
//! let source = NflverseClient::new(DEFAULT_BASE_URL, Duration::from_secs(60))?;
//! let request = ExportRequest {
//!     seasons: vec![Season::new(2024)],
//!     datasets: vec![DatasetKind::Injuries],
//!     aggregation: Aggregation::default(),
//! };
//!
//! let summary = run_export(&source, Path::new("data/nflverse.sqlite"), &request).await?;
//! println!("{} pairs written", summary.succeeded_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export NFLVERSE_DB_PATH=data/nflverse.sqlite
//! export NFLVERSE_BASE_URL=https://github.com/nflverse/nflverse-data/releases/download
//! export RUST_LOG=debug
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod nflverse;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{
    dataset::DatasetKind,
    levels::{AdvStatsSummary, Aggregation, SummaryLevel},
    time::Season,
};
pub use error::{ExportError, Result};

pub const DB_PATH_ENV_VAR: &str = "NFLVERSE_DB_PATH";
pub const BASE_URL_ENV_VAR: &str = "NFLVERSE_BASE_URL";
pub const DEFAULT_DB_PATH: &str = "data/nflverse.sqlite";
pub const DEFAULT_BASE_URL: &str = "https://github.com/nflverse/nflverse-data/releases/download";
