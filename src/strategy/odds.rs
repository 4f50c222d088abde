//! Bookmaker odds interpretation.
//!
//! Turns a fixture's match-winner and exact-score markets into a
//! `StrategyResult`: the odd gap between the two most likely outcomes,
//! an outcome classification, a confidence percentage, and a goal ratio
//! weighted towards the cheapest exact scores.

use serde::Deserialize;
use tracing::debug;

use crate::types::{
    BetValue, Bookmaker, ExpectedScore, GapTier, GoalRatio, MatchWinner, Prediction, ScoutError,
    StrategyResult,
};

// ---------------------------------------------------------------------------
// Configuration (defaults, overridden by the config file at runtime)
// ---------------------------------------------------------------------------

/// Number of cheapest exact scores kept on the strategy.
const EXPECTED_SCORES_KEPT: usize = 4;

/// Confidence points available: 100 from the gap, 20 from the prediction
/// feed, 25 from the exact-score market.
const CONFIDENCE_MAX_SCORE: f64 = 145.0;
const PREDICTION_AGREEMENT_BONUS: f64 = 20.0;
const EXACT_SCORE_AGREEMENT_BONUS: f64 = 25.0;

/// Weight lost by each successive exact-score price level.
const PONDERATION_STEP: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OddsConfig {
    /// Gap between the two cheapest odds from which a favourite is a pure win.
    pub trust_level: f64,
    /// Gap under which a game is too uncertain to bet on.
    pub too_small: f64,
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            trust_level: 1.4,
            too_small: 1.0,
        }
    }
}

impl OddsConfig {
    pub fn tier(&self, odd_gap: f64) -> GapTier {
        if odd_gap >= self.trust_level {
            GapTier::Trusted
        } else if odd_gap < self.too_small {
            GapTier::Risky
        } else {
            GapTier::Standard
        }
    }
}

// ---------------------------------------------------------------------------
// Match-winner odds
// ---------------------------------------------------------------------------

/// Which result a match-winner price is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndGameType {
    Home,
    Draw,
    Away,
}

impl EndGameType {
    fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "home" | "1" => Some(EndGameType::Home),
            "draw" | "x" | "n" => Some(EndGameType::Draw),
            "away" | "2" => Some(EndGameType::Away),
            _ => None,
        }
    }
}

/// A match-winner price parsed to a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedOutcome {
    pub outcome: EndGameType,
    pub odd: f64,
}

/// Parse and sort (cheapest first) a match-winner market.
///
/// Fails fast on anything but exactly one well-formed price each for
/// Home, Draw and Away.
pub fn sorted_match_winner(values: &[BetValue]) -> Result<Vec<PricedOutcome>, ScoutError> {
    if values.len() != 3 {
        return Err(ScoutError::MalformedOdds(format!(
            "match winner market has {} outcomes, expected 3",
            values.len()
        )));
    }

    let mut priced = values
        .iter()
        .map(|v| {
            let outcome = EndGameType::from_label(&v.value).ok_or_else(|| {
                ScoutError::MalformedOdds(format!("unknown match winner label {:?}", v.value))
            })?;
            Ok(PricedOutcome {
                outcome,
                odd: v.decimal_odd()?,
            })
        })
        .collect::<Result<Vec<_>, ScoutError>>()?;

    for outcome in [EndGameType::Home, EndGameType::Draw, EndGameType::Away] {
        if !priced.iter().any(|p| p.outcome == outcome) {
            return Err(ScoutError::MalformedOdds(format!(
                "match winner market has no {outcome:?} price"
            )));
        }
    }

    // Stable: equal odds keep market order
    priced.sort_by(|a, b| a.odd.total_cmp(&b.odd));
    Ok(priced)
}

/// Difference between the two cheapest odds. `sorted` must be ascending.
pub fn odd_gap(sorted: &[PricedOutcome]) -> f64 {
    match sorted {
        [first, second, ..] => second.odd - first.odd,
        _ => 0.0,
    }
}

/// Classify the outcome from the favourite and the gap behind it.
pub fn classify(favourite: EndGameType, odd_gap: f64, trust_level: f64) -> MatchWinner {
    match favourite {
        EndGameType::Home if odd_gap >= trust_level => MatchWinner::HomeWin,
        EndGameType::Home => MatchWinner::HomeOrDraw,
        EndGameType::Away if odd_gap >= trust_level => MatchWinner::AwayWin,
        EndGameType::Away => MatchWinner::AwayOrDraw,
        EndGameType::Draw => MatchWinner::Draw,
    }
}

// ---------------------------------------------------------------------------
// Exact-score odds
// ---------------------------------------------------------------------------

/// Parse the exact-score market, cheapest first. Labels that are not a
/// `home:away` score and prices that do not parse are dropped.
pub fn sorted_exact_scores(values: &[BetValue]) -> Vec<ExpectedScore> {
    let mut scores: Vec<ExpectedScore> = values
        .iter()
        .filter_map(|v| {
            let odd = v.decimal_odd().ok()?;
            let score = ExpectedScore::parse(&v.value, odd);
            if score.is_none() {
                debug!(label = %v.value, "Skipping non-score exact score label");
            }
            score
        })
        .collect();
    scores.sort_by(|a, b| a.odd.total_cmp(&b.odd));
    scores
}

/// Odds-weighted average of the most likely exact scores.
///
/// Walks the scores cheapest first. The weight starts at 1.0 and drops by
/// `PONDERATION_STEP` every time the price changes. Each score is counted,
/// then the walk stops once a price exceeds `ceil(best) + 1` or the weight
/// is spent. `sorted` must be ascending.
pub fn goal_ratio(sorted: &[ExpectedScore]) -> GoalRatio {
    let Some(best) = sorted.first() else {
        return GoalRatio::default();
    };
    let cutoff = best.odd.ceil() + 1.0;

    let mut ponderation = 1.0;
    let mut last_odd = best.odd;
    let (mut home, mut away, mut weight) = (0.0, 0.0, 0.0);

    for score in sorted {
        if score.odd != last_odd {
            ponderation -= PONDERATION_STEP;
            last_odd = score.odd;
        }
        if ponderation <= 0.0 {
            break;
        }

        home += score.home as f64 * ponderation;
        away += score.away as f64 * ponderation;
        weight += ponderation;

        if score.odd > cutoff {
            break;
        }
    }

    if weight > 0.0 {
        GoalRatio::new(home / weight, away / weight)
    } else {
        GoalRatio::default()
    }
}

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// Confidence percentage in the inferred outcome.
///
/// Gap points (capped at 100), plus agreement with the prediction feed
/// (or its absence), plus agreement with the cheapest exact score;
/// rescaled to 0–100.
pub fn confidence(
    odd_gap: f64,
    outcome: MatchWinner,
    prediction: Option<&Prediction>,
    primary_score: Option<&ExpectedScore>,
) -> u8 {
    let mut score = ((odd_gap - 1.0) * 100.0).min(100.0);

    let prediction_agrees = match prediction {
        None => true,
        Some(p) => !p.is_available() || p.winner() == Some(outcome),
    };
    if prediction_agrees {
        score += PREDICTION_AGREEMENT_BONUS;
    }

    if primary_score.is_some_and(|s| s.winner() == outcome) {
        score += EXACT_SCORE_AGREEMENT_BONUS;
    }

    (score / CONFIDENCE_MAX_SCORE * 100.0).round().clamp(0.0, 100.0) as u8
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// Interprets one fixture's odds into a `StrategyResult`.
#[derive(Debug, Clone, Default)]
pub struct OddsInterpreter {
    config: OddsConfig,
}

impl OddsInterpreter {
    pub fn new(config: OddsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OddsConfig {
        &self.config
    }

    /// Interpret a bookmaker's odds.
    ///
    /// Returns `Ok(None)` when the bookmaker prices no match-winner market,
    /// and an error when that market is structurally invalid.
    pub fn interpret(
        &self,
        odds: &Bookmaker,
        prediction: Option<&Prediction>,
    ) -> Result<Option<StrategyResult>, ScoutError> {
        let Some(match_winner) = odds.match_winner() else {
            return Ok(None);
        };

        let sorted = sorted_match_winner(match_winner)?;
        let gap = odd_gap(&sorted);
        let outcome = classify(sorted[0].outcome, gap, self.config.trust_level);

        let exact_scores = sorted_exact_scores(odds.exact_score());
        let ratio = goal_ratio(&exact_scores);
        let confidence = confidence(gap, outcome, prediction, exact_scores.first());

        let mut expected_scores = exact_scores;
        expected_scores.truncate(EXPECTED_SCORES_KEPT);

        debug!(
            bookmaker = %odds.name,
            odd_gap = format!("{gap:.2}"),
            outcome = %outcome,
            confidence,
            goal_ratio = format!("{:.2}/{:.2}", ratio.home, ratio.away),
            "Odds interpreted"
        );

        Ok(Some(StrategyResult {
            odd_gap: gap,
            match_winner: outcome,
            confidence,
            expected_scores,
            goal_ratio: ratio,
            tier: self.config.tier(gap),
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BetMarket, WinningPercent, EXACT_SCORE_MARKET, MATCH_WINNER_MARKET};

    fn make_match_winner(home: &str, draw: &str, away: &str) -> BetMarket {
        BetMarket {
            label: MATCH_WINNER_MARKET.into(),
            values: vec![
                BetValue::new("Home", home),
                BetValue::new("Draw", draw),
                BetValue::new("Away", away),
            ],
        }
    }

    fn make_exact_scores(scores: &[(&str, &str)]) -> BetMarket {
        BetMarket {
            label: EXACT_SCORE_MARKET.into(),
            values: scores.iter().map(|(s, o)| BetValue::new(*s, *o)).collect(),
        }
    }

    fn make_bookmaker(bets: Vec<BetMarket>) -> Bookmaker {
        Bookmaker {
            name: "10bet".into(),
            bets,
        }
    }

    fn make_prediction(winner: &str) -> Prediction {
        Prediction {
            match_winner: Some(winner.into()),
            advice: "Winner : PSG".into(),
            winning_percent: WinningPercent::default(),
        }
    }

    fn score(home: u32, away: u32, odd: f64) -> ExpectedScore {
        ExpectedScore { home, away, odd }
    }

    #[test]
    fn test_sorted_match_winner_and_gap() {
        let m = make_match_winner("1.5", "4.0", "6.0");
        let sorted = sorted_match_winner(&m.values).unwrap();
        let odds: Vec<f64> = sorted.iter().map(|p| p.odd).collect();
        assert_eq!(odds, vec![1.5, 4.0, 6.0]);
        assert_eq!(sorted[0].outcome, EndGameType::Home);
        assert_eq!(odd_gap(&sorted), 2.5);
    }

    #[test]
    fn test_gap_is_non_negative_for_any_order() {
        for (h, d, a) in [("6.0", "4.0", "1.5"), ("3.1", "3.1", "2.2"), ("2.0", "2.0", "2.0")] {
            let m = make_match_winner(h, d, a);
            let sorted = sorted_match_winner(&m.values).unwrap();
            let gap = odd_gap(&sorted);
            assert!(gap >= 0.0);
            let mut raw: Vec<f64> = [h, d, a].iter().map(|s| s.parse().unwrap()).collect();
            raw.sort_by(|x, y| x.total_cmp(y));
            assert_eq!(gap, raw[1] - raw[0]);
        }
    }

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(classify(EndGameType::Home, 2.5, 1.4), MatchWinner::HomeWin);
        assert_eq!(classify(EndGameType::Home, 1.4, 1.4), MatchWinner::HomeWin);
        assert_eq!(classify(EndGameType::Home, 1.39, 1.4), MatchWinner::HomeOrDraw);
        assert_eq!(classify(EndGameType::Away, 1.6, 1.4), MatchWinner::AwayWin);
        assert_eq!(classify(EndGameType::Away, 0.2, 1.4), MatchWinner::AwayOrDraw);
        assert_eq!(classify(EndGameType::Draw, 3.0, 1.4), MatchWinner::Draw);
    }

    #[test]
    fn test_malformed_match_winner_fails_fast() {
        let short = vec![BetValue::new("Home", "1.5"), BetValue::new("Away", "3.0")];
        assert!(matches!(
            sorted_match_winner(&short),
            Err(ScoutError::MalformedOdds(_))
        ));

        let unknown = make_match_winner("1.5", "4.0", "6.0");
        let mut values = unknown.values;
        values[1].value = "Over 2.5".into();
        assert!(matches!(
            sorted_match_winner(&values),
            Err(ScoutError::MalformedOdds(_))
        ));

        let duplicate = vec![
            BetValue::new("Home", "1.5"),
            BetValue::new("Home", "1.6"),
            BetValue::new("Away", "5.0"),
        ];
        assert!(matches!(
            sorted_match_winner(&duplicate),
            Err(ScoutError::MalformedOdds(_))
        ));

        let mut extra = make_match_winner("1.5", "4.0", "6.0").values;
        extra.push(BetValue::new("Draw", "3.9"));
        assert!(matches!(
            sorted_match_winner(&extra),
            Err(ScoutError::MalformedOdds(_))
        ));

        let bad_odd = make_match_winner("1.5", "four", "6.0");
        assert!(matches!(
            sorted_match_winner(&bad_odd.values),
            Err(ScoutError::InvalidOdd(_))
        ));
    }

    #[test]
    fn test_goal_ratio_ponderation_example() {
        let market = make_exact_scores(&[("1:0", "3.0"), ("1:1", "3.0"), ("2:0", "4.5")]);
        let sorted = sorted_exact_scores(&market.values);
        let ratio = goal_ratio(&sorted);
        // Weights 1.0, 1.0, 0.75: home (1 + 1 + 1.5) / 2.75, away 1 / 2.75
        assert!((ratio.home - 3.5 / 2.75).abs() < 1e-12);
        assert!((ratio.away - 1.0 / 2.75).abs() < 1e-12);
    }

    #[test]
    fn test_goal_ratio_stops_after_cutoff() {
        // best 1.5 → cutoff ceil(1.5)+1 = 3.0; 5.0 is counted then stops
        let sorted = vec![score(1, 0, 1.5), score(2, 0, 5.0), score(9, 9, 6.0)];
        let ratio = goal_ratio(&sorted);
        assert!((ratio.home - (1.0 + 2.0 * 0.75) / 1.75).abs() < 1e-12);
        assert_eq!(ratio.away, 0.0);
    }

    #[test]
    fn test_goal_ratio_weight_exhaustion() {
        // Prices close together: weight runs out after four levels
        let sorted = vec![
            score(1, 0, 6.0),
            score(1, 1, 6.1),
            score(2, 1, 6.2),
            score(0, 1, 6.3),
            score(5, 5, 6.4),
        ];
        let ratio = goal_ratio(&sorted);
        let w = 1.0 + 0.75 + 0.5 + 0.25;
        assert!((ratio.home - (1.0 + 0.75 + 2.0 * 0.5) / w).abs() < 1e-12);
        assert!((ratio.away - (0.75 + 0.5 + 0.25) / w).abs() < 1e-12);
    }

    #[test]
    fn test_goal_ratio_empty_market() {
        assert_eq!(goal_ratio(&[]), GoalRatio::new(0.0, 0.0));
    }

    #[test]
    fn test_exact_scores_skip_non_scores() {
        let market = make_exact_scores(&[("Other", "2.0"), ("2:1", "8.0"), ("1:0", "6.5"), ("0:0", "x")]);
        let sorted = sorted_exact_scores(&market.values);
        let labels: Vec<String> = sorted.iter().map(|s| s.to_string()).collect();
        assert_eq!(labels, vec!["1:0", "2:1"]);
    }

    #[test]
    fn test_confidence_all_bonuses() {
        // gap 2.5 → 100 (capped) + 20 + 25 = 145 → 100%
        let p = make_prediction("1");
        let c = confidence(2.5, MatchWinner::HomeWin, Some(&p), Some(&score(1, 0, 6.0)));
        assert_eq!(c, 100);
    }

    #[test]
    fn test_confidence_prediction_disagrees() {
        // gap 1.5 → 50, prediction says away, score agrees → 75/145 → 52
        let p = make_prediction("2");
        let c = confidence(1.5, MatchWinner::HomeWin, Some(&p), Some(&score(2, 0, 6.0)));
        assert_eq!(c, 52);
    }

    #[test]
    fn test_confidence_missing_prediction_counts_as_agreement() {
        let c = confidence(1.5, MatchWinner::HomeWin, None, None);
        // 50 + 20 = 70 → 48.27 → 48
        assert_eq!(c, 48);
        let unavailable = Prediction {
            match_winner: None,
            advice: crate::types::NO_PREDICTION_AVAILABLE.into(),
            winning_percent: WinningPercent::default(),
        };
        assert_eq!(confidence(1.5, MatchWinner::HomeWin, Some(&unavailable), None), 48);
    }

    #[test]
    fn test_confidence_clamped_for_tiny_gaps() {
        let p = make_prediction("2");
        assert_eq!(confidence(0.1, MatchWinner::HomeOrDraw, Some(&p), None), 0);
        assert!(confidence(50.0, MatchWinner::HomeWin, None, Some(&score(3, 0, 4.0))) <= 100);
    }

    #[test]
    fn test_or_draw_never_matches_exact_score() {
        let c = confidence(1.2, MatchWinner::HomeOrDraw, None, Some(&score(1, 0, 5.0)));
        // 20 + 20 = 40 → 27.6 → 28
        assert_eq!(c, 28);
    }

    #[test]
    fn test_interpret_home_win_example() {
        let odds = make_bookmaker(vec![
            make_match_winner("1.5", "4.0", "6.0"),
            make_exact_scores(&[
                ("1:0", "6.0"),
                ("2:0", "6.5"),
                ("2:1", "7.0"),
                ("3:0", "9.0"),
                ("0:0", "11.0"),
            ]),
        ]);
        let result = OddsInterpreter::default()
            .interpret(&odds, Some(&make_prediction("1")))
            .unwrap()
            .unwrap();
        assert_eq!(result.odd_gap, 2.5);
        assert_eq!(result.match_winner, MatchWinner::HomeWin);
        assert_eq!(result.tier, GapTier::Trusted);
        assert_eq!(result.confidence, 100);
        assert_eq!(result.expected_scores.len(), 4);
        assert_eq!(result.primary_score().map(|s| s.to_string()), Some("1:0".into()));
        assert!(result.goal_ratio.home > result.goal_ratio.away);
    }

    #[test]
    fn test_interpret_without_match_winner_market() {
        let odds = make_bookmaker(vec![make_exact_scores(&[("1:0", "6.0")])]);
        assert!(OddsInterpreter::default().interpret(&odds, None).unwrap().is_none());
    }

    #[test]
    fn test_interpret_without_exact_scores() {
        let odds = make_bookmaker(vec![make_match_winner("3.0", "3.2", "2.1")]);
        let result = OddsInterpreter::default().interpret(&odds, None).unwrap().unwrap();
        assert_eq!(result.match_winner, MatchWinner::AwayOrDraw);
        assert_eq!(result.goal_ratio, GoalRatio::default());
        assert!(result.expected_scores.is_empty());
        assert_eq!(result.tier, GapTier::Risky);
    }

    #[test]
    fn test_tier_boundaries() {
        let cfg = OddsConfig::default();
        assert_eq!(cfg.tier(1.4), GapTier::Trusted);
        assert_eq!(cfg.tier(1.0), GapTier::Standard);
        assert_eq!(cfg.tier(0.99), GapTier::Risky);
    }
}
