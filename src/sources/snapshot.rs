//! Offline roster source backed by a daily snapshot.
//!
//! A snapshot is a single JSON document holding the round's fixtures
//! (odds and predictions already attached), every club's roster and
//! statistics, and optionally the manager's current squad.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::RosterSource;
use crate::engine::squad::SquadEntry;
use crate::types::{Fixture, Player, PlayerStatsRecord, SourceError, Team};

const SOURCE_NAME: &str = "snapshot";

/// One club's roster and statistics as dumped from the fantasy league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub team: Team,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub stats: Vec<PlayerStatsRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub round: Option<u32>,
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
    #[serde(default)]
    pub rosters: Vec<TeamRoster>,
    #[serde(default)]
    pub squad: Vec<SquadEntry>,
}

/// In-memory `RosterSource` over a snapshot's rosters, keyed by team id.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRoster {
    rosters: HashMap<u32, TeamRoster>,
}

impl SnapshotRoster {
    pub fn new(rosters: Vec<TeamRoster>) -> Self {
        Self {
            rosters: rosters.into_iter().map(|r| (r.team.id, r)).collect(),
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::new(snapshot.rosters.clone())
    }

    fn roster(&self, team: &Team) -> Result<&TeamRoster, SourceError> {
        self.rosters.get(&team.id).ok_or_else(|| SourceError::NotFound {
            source_name: SOURCE_NAME.to_string(),
            message: format!("no roster for {} (id {})", team.name, team.id),
        })
    }
}

#[async_trait]
impl RosterSource for SnapshotRoster {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn team_players(&self, team: &Team) -> Result<Vec<Player>, SourceError> {
        let roster = self.roster(team)?;
        debug!(team = %team.name, players = roster.players.len(), "Roster read from snapshot");
        Ok(roster.players.clone())
    }

    async fn team_stats(&self, team: &Team) -> Result<Vec<PlayerStatsRecord>, SourceError> {
        Ok(self.roster(team)?.stats.clone())
    }
}
