//! Core engine: rank games, rank teams, collect players.

pub mod game_sorter;
pub mod player_sorter;
pub mod squad;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, AppMode};
use crate::sources::{ManualOutcomeTable, RosterSource};
use crate::strategy::{OddsInterpreter, ScoreCalculator};
use crate::types::{Fixture, PlayerPools, RankingWarning, ScoredFixture, ScoutError, TeamAndGame};
use game_sorter::GameSorter;
use player_sorter::PlayerSorter;
use squad::{review_squad, SquadEntry, SquadReview};

/// Everything one scouting run produces, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ScoutReport {
    pub generated_at: DateTime<Utc>,
    pub mode: AppMode,
    pub fixtures: Vec<Arc<ScoredFixture>>,
    pub teams: Vec<TeamAndGame>,
    pub players: PlayerPools,
    pub squad: Option<SquadReview>,
    pub warnings: Vec<RankingWarning>,
}

/// Runs the full scouting pipeline.
///
/// Instantiate once per run; `run` takes the round's fixtures and the
/// manager's squad (possibly empty).
pub struct Scout {
    games: GameSorter,
    players: PlayerSorter,
    mode: AppMode,
    interactive: bool,
}

impl Scout {
    pub fn new(games: GameSorter, players: PlayerSorter, mode: AppMode, interactive: bool) -> Self {
        Self {
            games,
            players,
            mode,
            interactive,
        }
    }

    /// Wire the pipeline from configuration.
    pub fn from_config(cfg: &AppConfig, source: Arc<dyn RosterSource>) -> Result<Self, ScoutError> {
        let calculator = ScoreCalculator::new(cfg.rules.clone(), cfg.strategy.too_small);

        let mut games = GameSorter::new(OddsInterpreter::new(cfg.strategy.clone()), calculator.clone());
        let manual = ManualOutcomeTable::from_config(&cfg.manual_outcomes)?;
        if !manual.is_empty() {
            info!(outcomes = manual.len(), "Manual outcomes loaded");
            games = games.with_manual_outcomes(Arc::new(manual));
        }

        let players = PlayerSorter::new(
            source,
            calculator,
            cfg.players.clone(),
            cfg.strategy.too_small,
        );

        Ok(Self::new(games, players, cfg.app.mode, cfg.app.interactive))
    }

    pub async fn run(&self, fixtures: Vec<Fixture>, squad: &[SquadEntry]) -> ScoutReport {
        info!(
            mode = %self.mode,
            interactive = self.interactive,
            fixtures = fixtures.len(),
            "Scouting run starting"
        );

        // 1. Games by odd gap
        let ranking = self.games.rank_games(fixtures, self.interactive);

        // 2. Teams by expected points
        let teams = GameSorter::rank_teams_by_potential(&ranking.fixtures);

        // 3. Player pools from the best teams
        let players = self.players.collect_best_players(&teams).await;

        // 4. Current squad, if any
        let squad_review = (!squad.is_empty()).then(|| review_squad(squad, &players.pools));

        let mut warnings = ranking.warnings;
        warnings.extend(players.warnings);

        info!(
            teams_queried = players.teams_queried,
            players = players.pools.len(),
            warnings = warnings.len(),
            "Scouting run complete"
        );

        ScoutReport {
            generated_at: Utc::now(),
            mode: self.mode,
            fixtures: ranking.fixtures,
            teams,
            players: players.pools,
            squad: squad_review,
            warnings,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
