//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use nflverse_sqlite::{
    cli::{Cli, Commands},
    commands::{handle_export, handle_status, ExportParams},
    core::init_logging,
    Aggregation, Result,
};
use std::time::Duration;

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = Cli::parse();
    init_logging()?;

    match app.command {
        Commands::Export {
            seasons,
            summary_level,
            advstats_summary,
            datasets,
            store,
            base_url,
            timeout_secs,
            json,
        } => {
            handle_export(ExportParams {
                seasons,
                datasets,
                aggregation: Aggregation::new(summary_level, advstats_summary),
                db_path: store.db_path,
                base_url,
                timeout: Duration::from_secs(timeout_secs),
                as_json: json,
            })
            .await?
        }

        Commands::Status {
            seasons,
            store,
            json,
        } => handle_status(&seasons, &store.db_path, json)?,
    }

    Ok(())
}
