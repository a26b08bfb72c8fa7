//! Aggregation levels accepted by the nflverse stat feeds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of the team stats feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLevel {
    /// One row per team per week
    Week,
    /// Regular season totals
    #[default]
    Reg,
    /// Postseason totals
    Post,
    /// Regular season and postseason combined
    #[value(name = "reg+post")]
    #[serde(rename = "reg+post")]
    RegPost,
}

impl SummaryLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLevel::Week => "week",
            SummaryLevel::Reg => "reg",
            SummaryLevel::Post => "post",
            SummaryLevel::RegPost => "reg+post",
        }
    }

    /// Token used in release asset file names (`stats_team_regpost_2024.csv`).
    pub fn asset_token(&self) -> &'static str {
        match self {
            SummaryLevel::RegPost => "regpost",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for SummaryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Granularity of the Pro Football Reference advanced stats feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AdvStatsSummary {
    /// One row per player per game
    #[default]
    Week,
    /// One row per player per season
    Season,
}

impl AdvStatsSummary {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvStatsSummary::Week => "week",
            AdvStatsSummary::Season => "season",
        }
    }
}

impl fmt::Display for AdvStatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregation options for one export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Aggregation {
    pub team_stats: SummaryLevel,
    pub advstats: AdvStatsSummary,
}

impl Aggregation {
    pub fn new(team_stats: SummaryLevel, advstats: AdvStatsSummary) -> Self {
        Self {
            team_stats,
            advstats,
        }
    }
}
