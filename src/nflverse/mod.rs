//! Access to nflverse data releases.
//!
//! - `frame`: CSV payloads parsed into typed tabular frames
//! - `http`: the release-asset client used in production
//!
//! The exporter talks to the data provider only through [`DataSource`], so
//! tests can substitute canned responses for the network.

pub mod frame;
pub mod http;

pub use frame::{Affinity, Cell, Frame};
pub use http::NflverseClient;

use crate::{
    cli::types::{dataset::DatasetKind, levels::Aggregation, time::Season},
    Result,
};

/// Result of asking the data provider for one (dataset, season) pair.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The feed returned data for the season.
    Rows(Frame),
    /// The feed has nothing for this season yet. Not an error.
    NotAvailable { reason: String },
}

/// A provider of nflverse datasets.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    /// Fetch one dataset for one season.
    ///
    /// Returns `Ok(FetchOutcome::NotAvailable)` when the provider has not
    /// published the data, and `Err` for transport or payload failures.
    async fn fetch(
        &self,
        kind: DatasetKind,
        season: Season,
        aggregation: Aggregation,
    ) -> Result<FetchOutcome>;
}
