//! Persistence layer.
//!
//! Reads the daily fixture/roster snapshot and writes the scouting report,
//! both as JSON files.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::sources::Snapshot;

/// Default snapshot file path.
pub const DEFAULT_SNAPSHOT_FILE: &str = "scoutbot_snapshot.json";
/// Default report file path.
pub const DEFAULT_REPORT_FILE: &str = "scoutbot_report.json";

/// Load a snapshot from a JSON file.
/// Returns None if the file doesn't exist.
pub fn load_snapshot(path: Option<&str>) -> Result<Option<Snapshot>> {
    let path = path.unwrap_or(DEFAULT_SNAPSHOT_FILE);

    if !Path::new(path).exists() {
        info!(path, "No snapshot found");
        return Ok(None);
    }

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot from {path}"))?;
    let snapshot: Snapshot = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse snapshot from {path}"))?;

    info!(
        path,
        round = ?snapshot.round,
        fixtures = snapshot.fixtures.len(),
        rosters = snapshot.rosters.len(),
        squad = snapshot.squad.len(),
        "Snapshot loaded from disk"
    );
    Ok(Some(snapshot))
}

/// Write the report as pretty JSON.
pub fn save_report<T: Serialize>(report: &T, path: Option<&str>) -> Result<()> {
    let path = path.unwrap_or(DEFAULT_REPORT_FILE);
    write_json(report, path).context("Failed to save report")?;
    info!(path, "Report saved");
    Ok(())
}

/// Delete a file written by this module (for testing or reset).
pub fn delete_file(path: &str) -> Result<()> {
    if Path::new(path).exists() {
        std::fs::remove_file(path).with_context(|| format!("Failed to delete {path}"))?;
    }
    Ok(())
}

fn write_json<T: Serialize>(value: &T, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialise JSON")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {path}"))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
