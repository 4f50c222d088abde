//! Game and team ranking.
//!
//! Interprets every fixture's odds, attaches team potential scores, and
//! ranks fixtures by odd gap and teams by expected points. Fixtures that
//! cannot be scored are kept (ranked last) and reported as warnings.

use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::sources::ManualOutcomeProvider;
use crate::strategy::{OddsConfig, OddsInterpreter, ScoreCalculator};
use crate::types::{
    BetMarket, BetValue, Bookmaker, Fixture, MatchWinner, RankingWarning, ScoredFixture,
    TeamAndGame, Venue, WarningKind, EXACT_SCORE_MARKET, MATCH_WINNER_MARKET,
};

/// Bookmaker name carried by odds built from a manual outcome.
pub const MANUAL_BOOKMAKER: &str = "User guess";

/// Fixtures ranked by odd gap, plus what went wrong along the way.
#[derive(Debug, Clone, Default)]
pub struct GameRanking {
    pub fixtures: Vec<Arc<ScoredFixture>>,
    pub warnings: Vec<RankingWarning>,
}

impl GameRanking {
    pub fn scored(&self) -> impl Iterator<Item = &Arc<ScoredFixture>> {
        self.fixtures.iter().filter(|f| f.strategy.is_some())
    }
}

pub struct GameSorter {
    interpreter: OddsInterpreter,
    calculator: ScoreCalculator,
    manual: Option<Arc<dyn ManualOutcomeProvider>>,
}

impl GameSorter {
    pub fn new(interpreter: OddsInterpreter, calculator: ScoreCalculator) -> Self {
        Self {
            interpreter,
            calculator,
            manual: None,
        }
    }

    /// Attach the provider consulted for unpriced fixtures in interactive mode.
    pub fn with_manual_outcomes(mut self, provider: Arc<dyn ManualOutcomeProvider>) -> Self {
        self.manual = Some(provider);
        self
    }

    /// Score every fixture and sort by odd gap, largest first.
    ///
    /// Unscored fixtures keep their input order after all scored ones.
    pub fn rank_games(&self, fixtures: Vec<Fixture>, interactive: bool) -> GameRanking {
        let total = fixtures.len();
        let mut warnings = Vec::new();

        let mut scored: Vec<ScoredFixture> = fixtures
            .into_iter()
            .map(|f| self.score_fixture(f, interactive, &mut warnings))
            .collect();

        scored.sort_by(|a, b| match (a.odd_gap(), b.odd_gap()) {
            (Some(ga), Some(gb)) => gb.total_cmp(&ga),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        let ranking = GameRanking {
            fixtures: scored.into_iter().map(Arc::new).collect(),
            warnings,
        };
        info!(
            fixtures = total,
            scored = ranking.scored().count(),
            warnings = ranking.warnings.len(),
            "Games ranked"
        );
        ranking
    }

    /// Interpret one fixture's odds and attach both team scores.
    pub fn score_fixture(
        &self,
        mut fixture: Fixture,
        interactive: bool,
        warnings: &mut Vec<RankingWarning>,
    ) -> ScoredFixture {
        if fixture.odds.is_none() && interactive {
            if let Some(outcome) = self.manual.as_ref().and_then(|m| m.outcome_for(&fixture)) {
                info!(fixture = %fixture, outcome = %outcome, "Using manual outcome");
                fixture.odds = Some(synthetic_odds(outcome, self.interpreter.config()));
            }
        }

        let Some(odds) = fixture.odds.as_ref() else {
            warn!(fixture_id = fixture.id, fixture = %fixture, "No odds, strategy cannot be computed");
            warnings.push(RankingWarning::new(
                WarningKind::MissingOdds,
                fixture.to_string(),
                "no bookmaker odds",
            ));
            return ScoredFixture::unscored(fixture);
        };

        let strategy = match self.interpreter.interpret(odds, fixture.prediction.as_ref()) {
            Ok(Some(strategy)) => strategy,
            Ok(None) => {
                warn!(fixture_id = fixture.id, bookmaker = %odds.name, "No match winner market");
                warnings.push(RankingWarning::new(
                    WarningKind::MissingMatchWinner,
                    fixture.to_string(),
                    format!("{} prices no match winner market", odds.name),
                ));
                return ScoredFixture::unscored(fixture);
            }
            Err(e) => {
                warn!(fixture_id = fixture.id, error = %e, "Malformed odds, fixture skipped");
                warnings.push(RankingWarning::new(
                    WarningKind::MalformedOdds,
                    fixture.to_string(),
                    e.to_string(),
                ));
                return ScoredFixture::unscored(fixture);
            }
        };

        let home_score = self.calculator.team_potential_score(
            strategy.match_winner,
            &strategy.goal_ratio,
            Venue::Home,
        );
        let away_score = self.calculator.team_potential_score(
            strategy.match_winner,
            &strategy.goal_ratio,
            Venue::Away,
        );
        debug!(
            fixture_id = fixture.id,
            home = %home_score,
            away = %away_score,
            "Team scores attached"
        );

        ScoredFixture {
            fixture,
            strategy: Some(strategy),
            home_score: Some(home_score),
            away_score: Some(away_score),
        }
    }

    /// Both sides of every fixture, best expected points first.
    ///
    /// Equal averages fall back to the larger odd gap. Teams without a
    /// score come last.
    pub fn rank_teams_by_potential(games: &[Arc<ScoredFixture>]) -> Vec<TeamAndGame> {
        let mut teams: Vec<TeamAndGame> = games
            .iter()
            .flat_map(|g| {
                [
                    TeamAndGame::new(Arc::clone(g), Venue::Home),
                    TeamAndGame::new(Arc::clone(g), Venue::Away),
                ]
            })
            .collect();

        teams.sort_by(|a, b| match (a.potential_score(), b.potential_score()) {
            (Some(sa), Some(sb)) => sb.average.total_cmp(&sa.average).then_with(|| {
                let (ga, gb) = (a.odd_gap().unwrap_or(0.0), b.odd_gap().unwrap_or(0.0));
                gb.total_cmp(&ga)
            }),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        teams
    }
}

// ---------------------------------------------------------------------------
// Manual outcomes
// ---------------------------------------------------------------------------

/// Encode a chosen outcome as odds that interpret back to it.
///
/// The favourite is priced at 0 and the runner-up at the gap that lands
/// on the requested classification; the exact-score market repeats a
/// single representative score at rising prices.
pub fn synthetic_odds(outcome: MatchWinner, config: &OddsConfig) -> Bookmaker {
    let or_draw_gap = (config.too_small + 0.1).to_string();
    let win_gap = config.trust_level.to_string();

    let (home, draw, away, score) = match outcome {
        MatchWinner::HomeWin => ("0".to_string(), win_gap, "5".to_string(), "1:0"),
        MatchWinner::HomeOrDraw => ("0".to_string(), or_draw_gap, "5".to_string(), "0:0"),
        MatchWinner::AwayWin => ("5".to_string(), win_gap, "0".to_string(), "0:1"),
        MatchWinner::AwayOrDraw => ("5".to_string(), or_draw_gap, "0".to_string(), "0:0"),
        MatchWinner::Draw => (or_draw_gap, "0".to_string(), "5".to_string(), "0:0"),
    };

    Bookmaker {
        name: MANUAL_BOOKMAKER.to_string(),
        bets: vec![
            BetMarket {
                label: MATCH_WINNER_MARKET.to_string(),
                values: vec![
                    BetValue::new("Home", home),
                    BetValue::new("Draw", draw),
                    BetValue::new("Away", away),
                ],
            },
            BetMarket {
                label: EXACT_SCORE_MARKET.to_string(),
                values: (0..4).map(|odd| BetValue::new(score, odd.to_string())).collect(),
            },
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
