//! Potential-score computation.
//!
//! Estimates the fantasy points a team or a player should earn in one
//! game as a `{min, max, average}` interval. Keepers and backs are scored
//! from their team's expected result; midfielders and strikers from their
//! own season output, modulated by how many goals their team should score.

use tracing::trace;

use super::rules::{AttackerRules, ScoreRules};
use crate::types::{
    GoalRatio, MatchWinner, Position, PotentialScore, SeasonStats, StrategyResult, TeamAndGame,
    Venue,
};

/// Pure calculator over a rule table. Every method returns the same result
/// for the same inputs.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    rules: ScoreRules,
    /// Odd gap a game must exceed before a clean sheet is trusted.
    too_small: f64,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new(ScoreRules::default(), 1.0)
    }
}

impl ScoreCalculator {
    pub fn new(rules: ScoreRules, too_small: f64) -> Self {
        Self { rules, too_small }
    }

    // -- Teams -----------------------------------------------------------

    /// Points a side should earn under the given outcome classification.
    ///
    /// The side's own expected goals raise its ceiling, the opponent's
    /// expected goals lower its floor.
    pub fn team_potential_score(
        &self,
        outcome: MatchWinner,
        goal_ratio: &GoalRatio,
        venue: Venue,
    ) -> PotentialScore {
        let team = &self.rules.team;
        let (min, max) = team.base_range(outcome, venue);
        PotentialScore::new(
            min - goal_ratio.conceded_by(venue) * team.points_per_goal_difference,
            max + goal_ratio.scored_by(venue) * team.points_per_goal_difference,
        )
    }

    // -- Players ---------------------------------------------------------

    /// Dispatch to the position's formula. `None` when the player's game
    /// has no strategy.
    pub fn player_potential_score(
        &self,
        position: Position,
        team: &TeamAndGame,
        stats: &SeasonStats,
    ) -> Option<PotentialScore> {
        match position {
            Position::Keeper => self.keeper_potential_score(team),
            Position::Back => self.back_potential_score(team, stats),
            Position::Midfield => self.midfield_potential_score(team, stats),
            Position::Striker => self.striker_potential_score(team, stats),
        }
    }

    /// Team baseline plus the clean-sheet bonus when it is expected.
    pub fn keeper_potential_score(&self, team: &TeamAndGame) -> Option<PotentialScore> {
        let strategy = team.strategy()?;
        let base = self.team_baseline(team, strategy);
        let keeper = &self.rules.keeper;

        let mut max = base.max;
        if self.expects_clean_sheet(strategy, team.venue, keeper.invincibility_goal_ratio) {
            max += keeper.invincibility;
        }
        Some(PotentialScore::new(base.min, max))
    }

    /// Keeper formula with the back's bonus, plus goal and tackle rates.
    pub fn back_potential_score(
        &self,
        team: &TeamAndGame,
        stats: &SeasonStats,
    ) -> Option<PotentialScore> {
        let strategy = team.strategy()?;
        let base = self.team_baseline(team, strategy);
        let back = &self.rules.back;

        let mut max = base.max;
        if self.expects_clean_sheet(strategy, team.venue, back.invincibility_goal_ratio) {
            max += back.invincibility;
        }
        max += stats.per_game(stats.goals_scored) * back.goal;
        max += stats.per_game(stats.tackles) * back.tackle;

        Some(PotentialScore::new(base.min, max))
    }

    pub fn midfield_potential_score(
        &self,
        team: &TeamAndGame,
        stats: &SeasonStats,
    ) -> Option<PotentialScore> {
        let strategy = team.strategy()?;
        Some(self.attacker_score(
            &self.rules.midfield,
            strategy.goal_ratio.scored_by(team.venue),
            stats,
        ))
    }

    pub fn striker_potential_score(
        &self,
        team: &TeamAndGame,
        stats: &SeasonStats,
    ) -> Option<PotentialScore> {
        let strategy = team.strategy()?;
        Some(self.attacker_score(
            &self.rules.striker,
            strategy.goal_ratio.scored_by(team.venue),
            stats,
        ))
    }

    // -- Internals -------------------------------------------------------

    fn team_baseline(&self, team: &TeamAndGame, strategy: &StrategyResult) -> PotentialScore {
        team.potential_score().copied().unwrap_or_else(|| {
            self.team_potential_score(strategy.match_winner, &strategy.goal_ratio, team.venue)
        })
    }

    fn expects_clean_sheet(&self, strategy: &StrategyResult, venue: Venue, threshold: f64) -> bool {
        strategy.goal_ratio.conceded_by(venue) <= threshold && strategy.odd_gap > self.too_small
    }

    /// Appearances as the floor, individual output on top.
    fn attacker_score(&self, rules: &AttackerRules, goal_ratio: f64, stats: &SeasonStats) -> PotentialScore {
        if stats.games_played <= 0.0 {
            return PotentialScore::zero();
        }

        let mut min = stats.games_played;
        let mut max = stats.games_played;

        max += stats.per_game(stats.goals_scored) * rules.goal * goal_ratio;
        max += stats.per_game(stats.assists) * rules.assist * goal_ratio;
        max += stats.per_game(stats.tackles) * rules.tackle;

        min -= stats.per_game(stats.yellow_cards) * rules.yellow_card_penalty;
        min -= stats.per_game(stats.red_cards) * rules.red_card_penalty;

        trace!(min, max, goal_ratio, "Attacker score");
        PotentialScore::new(min, max)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
