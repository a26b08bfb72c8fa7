//! Error types for the nflverse SQLite exporter

use thiserror::Error;


pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("nflverse returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot store error: {0:#}")]
    Store(#[from] anyhow::Error),

    #[error("Failed to parse season: {0}")]
    InvalidSeasonValue(#[from] std::num::ParseIntError),

    #[error("Season {season} is outside the supported range {min}-{max}")]
    InvalidSeason { season: u16, min: u16, max: u16 },

    #[error("At least one season must be requested")]
    NoSeasons,

    #[error("Payload for {dataset} has no '{column}' column")]
    MissingColumn { dataset: String, column: String },

    #[error("Logging setup failed: {message}")]
    Logging { message: String },
}
