//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{
    dataset::DatasetKind,
    levels::{AdvStatsSummary, SummaryLevel},
    time::Season,
};

use crate::{BASE_URL_ENV_VAR, DB_PATH_ENV_VAR, DEFAULT_BASE_URL, DEFAULT_DB_PATH};

/// Snapshot store location shared between commands
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// SQLite database path (or set `NFLVERSE_DB_PATH`).
    #[clap(long, env = DB_PATH_ENV_VAR, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,
}

#[derive(Debug, Parser)]
#[clap(
    name = "nflverse-sqlite",
    about = "Persist nflverse NFL data to a local SQLite snapshot"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download nflverse datasets for one or more seasons into SQLite.
    ///
    /// Each (season, dataset) pair replaces that season's rows in the dataset's
    /// table and is recorded in `ingest_metadata`. Feeds that are not yet
    /// published are skipped with a warning.
    Export {
        /// Season to export - repeatable: `-s 2023 -s 2024`. Defaults to the current season.
        #[clap(long = "season", short = 's')]
        seasons: Vec<Season>,

        /// Summary level for the team stats table.
        #[clap(long, value_enum, default_value_t = SummaryLevel::Reg)]
        summary_level: SummaryLevel,

        /// Summary level for Pro Football Reference advanced stats tables.
        #[clap(long, value_enum, default_value_t = AdvStatsSummary::Week)]
        advstats_summary: AdvStatsSummary,

        /// Dataset to export - repeatable. Defaults to all datasets.
        #[clap(long = "dataset", short = 'd', value_enum)]
        datasets: Vec<DatasetKind>,

        #[clap(flatten)]
        store: StoreArgs,

        /// Base URL of the nflverse release downloads (or set `NFLVERSE_BASE_URL`).
        #[clap(long, env = BASE_URL_ENV_VAR, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// HTTP timeout per request, in seconds.
        #[clap(long, default_value_t = 60)]
        timeout_secs: u64,

        /// Print the run summary as JSON.
        #[clap(long)]
        json: bool,
    },

    /// Show when each dataset/season pair was last refreshed.
    Status {
        /// Only show these seasons - repeatable.
        #[clap(long = "season", short = 's')]
        seasons: Vec<Season>,

        #[clap(flatten)]
        store: StoreArgs,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_defaults() {
        let cli = Cli::try_parse_from(["nflverse-sqlite", "export"]).unwrap();
        match cli.command {
            Commands::Export {
                seasons,
                summary_level,
                advstats_summary,
                datasets,
                timeout_secs,
                json,
                ..
            } => {
                assert!(seasons.is_empty());
                assert_eq!(summary_level, SummaryLevel::Reg);
                assert_eq!(advstats_summary, AdvStatsSummary::Week);
                assert!(datasets.is_empty());
                assert_eq!(timeout_secs, 60);
                assert!(!json);
            }
            _ => panic!("Expected export command"),
        }
    }

    #[test]
    fn test_export_repeatable_flags() {
        let cli = Cli::try_parse_from([
            "nflverse-sqlite",
            "export",
            "--season",
            "2024",
            "-s",
            "2025",
            "--summary-level",
            "reg+post",
            "--advstats-summary",
            "season",
            "-d",
            "injuries",
            "--dataset",
            "pfr-pass",
            "--db-path",
            "/tmp/snapshot.sqlite",
        ])
        .unwrap();

        match cli.command {
            Commands::Export {
                seasons,
                summary_level,
                advstats_summary,
                datasets,
                store,
                ..
            } => {
                assert_eq!(seasons, vec![Season::new(2024), Season::new(2025)]);
                assert_eq!(summary_level, SummaryLevel::RegPost);
                assert_eq!(advstats_summary, AdvStatsSummary::Season);
                assert_eq!(datasets, vec![DatasetKind::Injuries, DatasetKind::PfrPass]);
                assert_eq!(store.db_path, PathBuf::from("/tmp/snapshot.sqlite"));
            }
            _ => panic!("Expected export command"),
        }
    }

    #[test]
    fn test_export_rejects_bad_values() {
        assert!(Cli::try_parse_from(["nflverse-sqlite", "export", "-s", "abc"]).is_err());
        assert!(
            Cli::try_parse_from(["nflverse-sqlite", "export", "--summary-level", "season"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["nflverse-sqlite", "export", "-d", "depth-charts"]).is_err());
    }

    #[test]
    fn test_status_command() {
        let cli =
            Cli::try_parse_from(["nflverse-sqlite", "status", "-s", "2023", "--json"]).unwrap();
        match cli.command {
            Commands::Status { seasons, json, .. } => {
                assert_eq!(seasons, vec![Season::new(2023)]);
                assert!(json);
            }
            _ => panic!("Expected status command"),
        }
    }
}
