#![warn(clippy::uninlined_format_args)]

mod bootstrap;
mod config;
mod report;

use config::CliConfig;
use std::process;
use thiserror::Error;
use tripsplit_application::{SettlementService, SettlementServiceError};
use tripsplit_infrastructure::{
    InMemorySettlementStatusStore, JsonTripSnapshot, SnapshotError, TripSettlementOptimizer,
};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Settlement(#[from] SettlementServiceError),
}

type CliResult<T> = Result<T, CliError>;

fn main() {
    bootstrap::init_logging();

    if let Err(err) = run() {
        tracing::debug!(error = ?err, "Command failed");
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let config = CliConfig::from_env_and_args()?;
    let snapshot = JsonTripSnapshot::from_path(&config.snapshot)?;
    let statuses = InMemorySettlementStatusStore::with_statuses(
        snapshot.settlement_statuses().iter().cloned(),
    );
    let optimizer = TripSettlementOptimizer;
    let service = SettlementService::new(&snapshot, &statuses, &optimizer);
    let directory = snapshot.roster().to_vec();

    for message in report::apply_marks(&service, &config.mark_paid)? {
        println!("{message}");
    }
    if !config.mark_paid.is_empty() {
        println!();
    }

    print!(
        "{}",
        report::render_report(&service, config.report, &directory)?
    );
    Ok(())
}
