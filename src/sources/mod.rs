//! Upstream collaborators.
//!
//! Defines the `RosterSource` trait the player sorter pulls club rosters
//! and season statistics from, and the `ManualOutcomeProvider` consulted
//! for fixtures the bookmaker did not price.

pub mod manual;
pub mod snapshot;

use async_trait::async_trait;

use crate::types::{Fixture, MatchWinner, Player, PlayerStatsRecord, SourceError, Team};

pub use manual::ManualOutcomeTable;
pub use snapshot::{Snapshot, SnapshotRoster, TeamRoster};

/// Abstraction over the fantasy league's player feeds.
///
/// Implementations perform their own I/O and map failures to a
/// `SourceError` kind the caller can tell apart.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Players listed on a club's roster.
    async fn team_players(&self, team: &Team) -> Result<Vec<Player>, SourceError>;

    /// Season statistics for a club's players, keyed by player name.
    async fn team_stats(&self, team: &Team) -> Result<Vec<PlayerStatsRecord>, SourceError>;
}

/// Supplies an outcome for a fixture without bookmaker odds.
///
/// Only consulted in interactive mode. Returning `None` leaves the
/// fixture unscored.
pub trait ManualOutcomeProvider: Send + Sync {
    fn outcome_for(&self, fixture: &Fixture) -> Option<MatchWinner>;
}
