//! SCOUTBOT: fantasy football scout
//!
//! Entry point. Loads configuration, initialises structured logging,
//! reads the day's snapshot, runs the scouting pipeline once and writes
//! the report.

use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::{info, warn};

use scoutbot::config::AppConfig;
use scoutbot::engine::{Scout, ScoutReport};
use scoutbot::sources::SnapshotRoster;
use scoutbot::storage;

const BANNER: &str = r#"
 ___  ___ ___  _   _ _____ ___  ___ _____
/ __|/ __/ _ \| | | |_   _| _ )/ _ \_   _|
\__ \ (_| (_) | |_| | | | | _ \ (_) || |
|___/\___\___/ \___/  |_| |___/\___/ |_|

  Fantasy football scout
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path = AppConfig::path_from_env();
    let cfg = AppConfig::load_or_default(&config_path)?;

    println!("{BANNER}");
    info!(
        mode = %cfg.app.mode,
        interactive = cfg.app.interactive,
        config = %config_path,
        "SCOUTBOT starting up"
    );

    // -- Load snapshot ---------------------------------------------------

    let Some(snapshot) = storage::load_snapshot(Some(&cfg.app.snapshot_path))? else {
        bail!(
            "No snapshot at {}; nothing to scout",
            cfg.app.snapshot_path
        );
    };

    // -- Run -------------------------------------------------------------

    let source = Arc::new(SnapshotRoster::from_snapshot(&snapshot));
    let scout = Scout::from_config(&cfg, source)?;
    let report = scout.run(snapshot.fixtures, &snapshot.squad).await;

    log_report(&report);
    storage::save_report(&report, Some(&cfg.app.report_path))?;

    info!(report = %cfg.app.report_path, "SCOUTBOT done.");
    Ok(())
}

/// Log a human-readable summary of the run.
fn log_report(report: &ScoutReport) {
    for game in report.fixtures.iter().take(5) {
        info!(game = %game, "Top game");
    }
    for team in report.teams.iter().take(5) {
        info!(team = %team, "Top team");
    }
    for keeper in report.players.keepers.iter().take(3) {
        info!(player = %keeper, "Top keeper");
    }
    for striker in report.players.strikers.iter().take(3) {
        info!(player = %striker, "Top striker");
    }
    if let Some(squad) = &report.squad {
        for loser in &squad.likely_losers {
            warn!(player = %loser.name, club = %loser.club, "Likely loser in squad");
        }
    }
    for w in &report.warnings {
        warn!(warning = %w, "Run warning");
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scoutbot=info"));

    let json_logging = std::env::var("SCOUTBOT_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
