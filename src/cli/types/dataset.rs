//! Dataset kinds exported into the snapshot store.

use super::levels::{AdvStatsSummary, Aggregation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A named nflverse feed and the table it is written to.
///
/// Variant order is the canonical export order.
///
/// # Examples
///
/// ```rust
/// use nflverse_sqlite::{AdvStatsSummary, DatasetKind};
///
/// assert_eq!(DatasetKind::Injuries.table_name(AdvStatsSummary::Week), "injuries");
/// assert_eq!(
///     DatasetKind::PfrRush.table_name(AdvStatsSummary::Season),
///     "pfr_advstats_rush_season"
/// );
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    /// Team-level box score stats
    TeamStats,
    /// Game schedules and results
    Schedules,
    /// Season rosters
    Rosters,
    /// Weekly injury reports
    Injuries,
    /// PFR advanced passing stats
    PfrPass,
    /// PFR advanced rushing stats
    PfrRush,
    /// PFR advanced receiving stats
    PfrRec,
    /// PFR advanced defensive stats
    PfrDef,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 8] = [
        DatasetKind::TeamStats,
        DatasetKind::Schedules,
        DatasetKind::Rosters,
        DatasetKind::Injuries,
        DatasetKind::PfrPass,
        DatasetKind::PfrRush,
        DatasetKind::PfrRec,
        DatasetKind::PfrDef,
    ];

    /// PFR stat type (`pass`, `rush`, `rec`, `def`) for advanced stats kinds.
    pub fn adv_stat_type(&self) -> Option<&'static str> {
        match self {
            DatasetKind::PfrPass => Some("pass"),
            DatasetKind::PfrRush => Some("rush"),
            DatasetKind::PfrRec => Some("rec"),
            DatasetKind::PfrDef => Some("def"),
            _ => None,
        }
    }

    /// Name of the snapshot table this kind is written to.
    pub fn table_name(&self, advstats: AdvStatsSummary) -> String {
        match self {
            DatasetKind::TeamStats => "team_stats".to_string(),
            DatasetKind::Schedules => "schedules".to_string(),
            DatasetKind::Rosters => "rosters".to_string(),
            DatasetKind::Injuries => "injuries".to_string(),
            pfr => format!(
                "pfr_advstats_{}_{}",
                pfr.adv_stat_type().unwrap_or_default(),
                advstats.as_str()
            ),
        }
    }

    /// Summary level recorded in `ingest_metadata`, if the feed has one.
    pub fn summary_level(&self, aggregation: &Aggregation) -> Option<&'static str> {
        match self {
            DatasetKind::TeamStats => Some(aggregation.team_stats.as_str()),
            DatasetKind::Schedules | DatasetKind::Rosters | DatasetKind::Injuries => None,
            _ => Some(aggregation.advstats.as_str()),
        }
    }

    /// Columns of the lookup index created on this kind's table.
    pub fn index_columns(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::TeamStats => &["season", "team"],
            DatasetKind::Schedules => &["season", "week"],
            DatasetKind::Rosters => &["season", "team"],
            DatasetKind::Injuries => &["season", "week", "team"],
            _ => &["season"],
        }
    }

    /// Collapse a user selection into canonical order without duplicates.
    /// An empty selection means every kind.
    pub fn normalize(selection: &[DatasetKind]) -> Vec<DatasetKind> {
        if selection.is_empty() {
            return Self::ALL.to_vec();
        }
        selection
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DatasetKind::TeamStats => "team stats",
            DatasetKind::Schedules => "schedules",
            DatasetKind::Rosters => "rosters",
            DatasetKind::Injuries => "injuries",
            DatasetKind::PfrPass => "pfr advanced stats (pass)",
            DatasetKind::PfrRush => "pfr advanced stats (rush)",
            DatasetKind::PfrRec => "pfr advanced stats (rec)",
            DatasetKind::PfrDef => "pfr advanced stats (def)",
        };
        write!(f, "{}", s)
    }
}
