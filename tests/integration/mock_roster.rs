//! Mock roster source for integration testing.
//!
//! Provides a deterministic `RosterSource` implementation that serves
//! rosters and statistics from memory and records which teams were
//! fetched. Individual teams can be forced to fail.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use scoutbot::sources::RosterSource;
use scoutbot::types::*;

pub struct MockRoster {
    players: HashMap<u32, Vec<Player>>,
    stats: HashMap<u32, Vec<PlayerStatsRecord>>,
    /// Team ids whose fetches fail with a transport error.
    failing: Arc<Mutex<HashSet<u32>>>,
    fetched: Arc<Mutex<Vec<u32>>>,
}

impl MockRoster {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
            stats: HashMap::new(),
            failing: Arc::new(Mutex::new(HashSet::new())),
            fetched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a club with a standard squad: one keeper, five backs, five
    /// midfielders and four strikers with increasing value and output.
    pub fn with_club(mut self, team: &Team) -> Self {
        let mut players = Vec::new();
        let mut stats = Vec::new();
        let base = team.id as u64 * 100;

        let mut push = |offset: u64, position: Position, value: f64, goals: f64| {
            let name = format!("{} {:?} {}", team.name, position, offset);
            players.push(Player {
                id: base + offset,
                name: name.clone(),
                club: team.name.clone(),
                value,
                position,
            });
            stats.push(PlayerStatsRecord::new(
                name,
                vec![
                    StatEntry::new(StatCriteria::GamesPlayed, 10.0),
                    StatEntry::new(StatCriteria::GoalsScored, goals),
                    StatEntry::new(StatCriteria::Assists, goals / 2.0),
                    StatEntry::new(StatCriteria::Tackles, 10.0),
                    StatEntry::new(StatCriteria::AveragePoints, 5.0 + goals),
                ],
            ));
        };

        push(0, Position::Keeper, 12.0, 0.0);
        for i in 1..=5 {
            push(i, Position::Back, 5.0 + i as f64, i as f64 * 0.2);
            push(10 + i, Position::Midfield, 8.0 + i as f64, i as f64);
        }
        for i in 1..=4 {
            push(20 + i, Position::Striker, 10.0 + i as f64, i as f64 * 2.0);
        }

        self.players.insert(team.id, players);
        self.stats.insert(team.id, stats);
        self
    }

    /// Make every fetch for the team fail.
    pub fn fail_team(&self, team_id: u32) {
        self.failing.lock().unwrap().insert(team_id);
    }

    /// Team ids whose roster was requested, in request order.
    pub fn fetched(&self) -> Vec<u32> {
        self.fetched.lock().unwrap().clone()
    }

    fn check(&self, team: &Team) -> Result<(), SourceError> {
        if self.failing.lock().unwrap().contains(&team.id) {
            return Err(SourceError::Transport {
                source_name: "mock".into(),
                message: format!("connection reset while fetching {}", team.name),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RosterSource for MockRoster {
    fn name(&self) -> &str {
        "mock"
    }

    async fn team_players(&self, team: &Team) -> Result<Vec<Player>, SourceError> {
        self.fetched.lock().unwrap().push(team.id);
        self.check(team)?;
        self.players
            .get(&team.id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                source_name: "mock".into(),
                message: team.name.clone(),
            })
    }

    async fn team_stats(&self, team: &Team) -> Result<Vec<PlayerStatsRecord>, SourceError> {
        self.check(team)?;
        Ok(self.stats.get(&team.id).cloned().unwrap_or_default())
    }
}
