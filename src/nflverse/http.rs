//! HTTP client for nflverse release assets.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use super::{frame::Frame, DataSource, FetchOutcome};
use crate::{
    cli::types::{
        dataset::DatasetKind,
        levels::{AdvStatsSummary, Aggregation},
        time::Season,
    },
    core::http::build_client,
    error::ExportError,
    Result,
};

#[cfg(test)]
mod tests;

/// Release asset path (relative to the download base URL) for one pair.
pub fn asset_path(kind: DatasetKind, season: Season, aggregation: Aggregation) -> String {
    match kind {
        DatasetKind::TeamStats => format!(
            "stats_team/stats_team_{}_{}.csv",
            aggregation.team_stats.asset_token(),
            season
        ),
        DatasetKind::Schedules => "schedules/games.csv".to_string(),
        DatasetKind::Rosters => format!("rosters/roster_{}.csv", season),
        DatasetKind::Injuries => format!("injuries/injuries_{}.csv", season),
        pfr => {
            let stat_type = pfr.adv_stat_type().unwrap_or_default();
            match aggregation.advstats {
                AdvStatsSummary::Season => {
                    format!("pfr_advstats/advstats_season_{}.csv", stat_type)
                }
                AdvStatsSummary::Week => {
                    format!("pfr_advstats/advstats_week_{}_{}.csv", stat_type, season)
                }
            }
        }
    }
}

/// Whether the asset holds every season and must be filtered client-side.
pub fn covers_all_seasons(kind: DatasetKind, aggregation: Aggregation) -> bool {
    match kind {
        DatasetKind::Schedules => true,
        k if k.adv_stat_type().is_some() => aggregation.advstats == AdvStatsSummary::Season,
        _ => false,
    }
}

/// Fetches nflverse CSV release assets over HTTPS.
#[derive(Debug, Clone)]
pub struct NflverseClient {
    client: Client,
    base_url: String,
}

impl NflverseClient {
    /// Create a client against `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(build_client(timeout)?, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn asset_url(&self, kind: DatasetKind, season: Season, aggregation: Aggregation) -> String {
        format!("{}/{}", self.base_url, asset_path(kind, season, aggregation))
    }
}

impl DataSource for NflverseClient {
    async fn fetch(
        &self,
        kind: DatasetKind,
        season: Season,
        aggregation: Aggregation,
    ) -> Result<FetchOutcome> {
        let url = self.asset_url(kind, season, aggregation);
        debug!(%url, "fetching nflverse asset");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(FetchOutcome::NotAvailable {
                reason: format!("{} is not published", asset_path(kind, season, aggregation)),
            });
        }
        if !status.is_success() {
            return Err(ExportError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        let mut frame = Frame::from_csv(body.as_ref())?;

        if frame.columns().is_empty() {
            return Ok(FetchOutcome::NotAvailable {
                reason: "payload is empty".to_string(),
            });
        }
        if covers_all_seasons(kind, aggregation) {
            frame.retain_season(&kind.table_name(aggregation.advstats), season)?;
        }
        if frame.is_empty() {
            return Ok(FetchOutcome::NotAvailable {
                reason: format!("no rows for season {}", season),
            });
        }

        Ok(FetchOutcome::Rows(frame))
    }
}
