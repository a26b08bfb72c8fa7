//! Storage layer for the nflverse snapshot file
//!
//! This module provides a thin abstraction over the SQLite snapshot,
//! organized into logical components:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `tables`: Per-season replacement of dataset tables
//! - `metadata`: The `ingest_metadata` recorder

pub mod metadata;
pub mod models;
pub mod schema;
pub mod tables;


// Re-export the main types and store struct for easy access
pub use models::*;
pub use schema::SnapshotStore;
pub use tables::TableWrite;
