//! Player candidate pools.
//!
//! Pulls rosters and season statistics for the best-ranked teams, scores
//! every player for the game their club plays, then trims and ranks each
//! position's pool.

use futures::future::join_all;
use serde::Deserialize;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::sources::RosterSource;
use crate::strategy::ScoreCalculator;
use crate::types::{
    Player, PlayerPools, PlayerStatsRecord, Position, PotentialScore, RankingWarning,
    ScoredPlayer, SourceError, TeamAndGame,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerSorterConfig {
    /// Size of a full fantasy squad.
    pub desired_players: usize,
    /// League rule: players allowed from the same club.
    pub max_players_per_team: usize,
    pub backs_per_team: usize,
    pub midfields_per_team: usize,
    pub strikers_per_team: usize,
}

impl Default for PlayerSorterConfig {
    fn default() -> Self {
        Self {
            desired_players: 15,
            max_players_per_team: 2,
            backs_per_team: 4,
            midfields_per_team: 4,
            strikers_per_team: 3,
        }
    }
}

impl PlayerSorterConfig {
    /// Teams needed to fill a squad, bounded by how many are available.
    pub fn teams_to_query(&self, available: usize) -> usize {
        let per_team = self.max_players_per_team.max(1);
        self.desired_players.div_ceil(per_team).min(available)
    }
}

/// Ranked pools and the teams that could not be fetched.
#[derive(Debug, Clone, Default)]
pub struct PlayerRanking {
    pub pools: PlayerPools,
    pub teams_queried: usize,
    pub warnings: Vec<RankingWarning>,
}

// ---------------------------------------------------------------------------
// Sorter
// ---------------------------------------------------------------------------

pub struct PlayerSorter {
    source: Arc<dyn RosterSource>,
    calculator: ScoreCalculator,
    config: PlayerSorterConfig,
    /// Keepers whose game gap is under this are dropped.
    too_small: f64,
}

impl PlayerSorter {
    pub fn new(
        source: Arc<dyn RosterSource>,
        calculator: ScoreCalculator,
        config: PlayerSorterConfig,
        too_small: f64,
    ) -> Self {
        Self {
            source,
            calculator,
            config,
            too_small,
        }
    }

    /// Fetch, score and rank players from the top of `ranked_teams`.
    ///
    /// Teams are fetched concurrently. A team whose roster or statistics
    /// cannot be fetched is logged, reported and left out.
    pub async fn collect_best_players(&self, ranked_teams: &[TeamAndGame]) -> PlayerRanking {
        let teams_queried = self.config.teams_to_query(ranked_teams.len());
        let selected = &ranked_teams[..teams_queried];
        info!(teams = teams_queried, "Collecting players");

        let results = join_all(selected.iter().map(|t| self.fetch_team(t))).await;

        let mut pools = PlayerPools::default();
        let mut warnings = Vec::new();
        for (team, result) in selected.iter().zip(results) {
            match result {
                Ok(players) => {
                    debug!(team = %team.team, players = players.len(), "Team players scored");
                    for p in players {
                        pools.pool_mut(p.player.position).push(p);
                    }
                }
                Err(e) => {
                    warn!(
                        source = self.source.name(),
                        team = %team.team,
                        error = %e,
                        "Team fetch failed, continuing without"
                    );
                    warnings.push(RankingWarning::source_failure(team.team.name.clone(), e));
                }
            }
        }

        let pools = self.trim_and_rank(pools, teams_queried);
        info!(
            keepers = pools.keepers.len(),
            backs = pools.backs.len(),
            midfields = pools.midfields.len(),
            strikers = pools.strikers.len(),
            failed_teams = warnings.len(),
            "Player pools ranked"
        );

        PlayerRanking {
            pools,
            teams_queried,
            warnings,
        }
    }

    async fn fetch_team(&self, team: &TeamAndGame) -> Result<Vec<ScoredPlayer>, SourceError> {
        let (players, stats) = tokio::join!(
            self.source.team_players(&team.team),
            self.source.team_stats(&team.team),
        );
        let (players, stats) = (players?, stats?);

        Ok(players
            .into_iter()
            .map(|p| self.score_player(p, &stats, team))
            .collect())
    }

    /// Join a roster player with their statistics and score them.
    pub fn score_player(
        &self,
        player: Player,
        records: &[PlayerStatsRecord],
        team: &TeamAndGame,
    ) -> ScoredPlayer {
        let record = records.iter().find(|r| r.matches(&player.name));
        let stats = record.map(PlayerStatsRecord::season_stats).unwrap_or_default();
        let average_points = record.map(PlayerStatsRecord::average_points).unwrap_or(0.0);
        let potential_score = self
            .calculator
            .player_potential_score(player.position, team, &stats);

        ScoredPlayer {
            player,
            stats,
            average_points,
            team_and_game: team.clone(),
            potential_score,
        }
    }

    /// Truncate each pool by market value, drop risky keepers, then rank.
    pub fn trim_and_rank(&self, mut pools: PlayerPools, teams_queried: usize) -> PlayerPools {
        for position in Position::ALL {
            let limit = match position {
                Position::Keeper => teams_queried,
                Position::Back => self.config.backs_per_team * teams_queried,
                Position::Midfield => self.config.midfields_per_team * teams_queried,
                Position::Striker => self.config.strikers_per_team * teams_queried,
            };
            let pool = pools.pool_mut(position);
            pool.sort_by(|a, b| b.player.value.total_cmp(&a.player.value));
            pool.truncate(limit);
        }

        let before = pools.keepers.len();
        pools
            .keepers
            .retain(|k| k.odd_gap().is_some_and(|gap| gap >= self.too_small));
        if pools.keepers.len() < before {
            debug!(
                dropped = before - pools.keepers.len(),
                too_small = self.too_small,
                "Risky keepers dropped"
            );
        }

        pools.keepers.sort_by(|a, b| by_score(a, b, |s| s.average));
        pools.backs.sort_by(|a, b| by_score(a, b, |s| s.average));
        pools.midfields.sort_by(|a, b| by_score(a, b, |s| s.average));
        pools.strikers.sort_by(|a, b| by_score(a, b, |s| s.max));
        pools
    }
}

/// Descending on the chosen score component, then on average points.
/// Players without a score go last.
fn by_score(a: &ScoredPlayer, b: &ScoredPlayer, key: fn(&PotentialScore) -> f64) -> Ordering {
    let points = || b.average_points.total_cmp(&a.average_points);
    match (&a.potential_score, &b.potential_score) {
        (Some(sa), Some(sb)) => key(sb).total_cmp(&key(sa)).then_with(points),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => points(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
