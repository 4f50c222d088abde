//! Shared types for SCOUTBOT.
//!
//! These types form the data model used across all modules: fixtures and
//! their bookmaker odds as delivered upstream, the strategy attached once
//! odds are interpreted, fantasy players with their season statistics,
//! and the error kinds surfaced at component boundaries.

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Advice text the prediction feed returns when it has nothing to say.
pub const NO_PREDICTION_AVAILABLE: &str = "No predictions available";

/// Bookmaker market labels we read.
pub const MATCH_WINNER_MARKET: &str = "Match Winner";
pub const EXACT_SCORE_MARKET: &str = "Exact Score";

// ---------------------------------------------------------------------------
// Teams and fixtures
// ---------------------------------------------------------------------------

/// A club as identified by the fixtures feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
}

impl Team {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Which side of a fixture a team plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    pub fn opposite(&self) -> Venue {
        match self {
            Venue::Home => Venue::Away,
            Venue::Away => Venue::Home,
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::Home => write!(f, "home"),
            Venue::Away => write!(f, "away"),
        }
    }
}

/// One priced outcome of a bookmaker market, as text (`"1:0"` / `"8.50"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetValue {
    pub value: String,
    pub odd: String,
}

impl BetValue {
    pub fn new(value: impl Into<String>, odd: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            odd: odd.into(),
        }
    }

    /// Parse the textual decimal odd. Rejects non-finite and negative values.
    pub fn decimal_odd(&self) -> Result<f64, ScoutError> {
        let odd: f64 = self
            .odd
            .trim()
            .parse()
            .map_err(|_| ScoutError::InvalidOdd(self.odd.clone()))?;
        if !odd.is_finite() || odd < 0.0 {
            return Err(ScoutError::InvalidOdd(self.odd.clone()));
        }
        Ok(odd)
    }
}

/// A bookmaker market such as "Match Winner" or "Exact Score".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetMarket {
    pub label: String,
    pub values: Vec<BetValue>,
}

/// Odds bundle of a single bookmaker for one fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmaker {
    pub name: String,
    #[serde(default)]
    pub bets: Vec<BetMarket>,
}

impl Bookmaker {
    /// Values of the market with the given label, if the bookmaker prices it.
    pub fn market(&self, label: &str) -> Option<&[BetValue]> {
        self.bets
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.values.as_slice())
    }

    pub fn match_winner(&self) -> Option<&[BetValue]> {
        self.market(MATCH_WINNER_MARKET)
    }

    /// Exact-score values; empty when the market is absent.
    pub fn exact_score(&self) -> &[BetValue] {
        self.market(EXACT_SCORE_MARKET).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WinningPercent {
    #[serde(default)]
    pub home: String,
    #[serde(default)]
    pub draws: String,
    #[serde(default)]
    pub away: String,
}

/// Upstream prediction for a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Winner code as sent upstream ("1", "N", "2", "1 N", "N 2").
    #[serde(default)]
    pub match_winner: Option<String>,
    #[serde(default)]
    pub advice: String,
    #[serde(default)]
    pub winning_percent: WinningPercent,
}

impl Prediction {
    /// False when the feed explicitly has no prediction for this game.
    pub fn is_available(&self) -> bool {
        self.advice != NO_PREDICTION_AVAILABLE
    }

    pub fn winner(&self) -> Option<MatchWinner> {
        self.match_winner
            .as_deref()
            .and_then(MatchWinner::from_code)
    }
}

/// A scheduled match with whatever odds and predictions were attached upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: u64,
    #[serde(default)]
    pub round: String,
    #[serde(default)]
    pub event_date: Option<DateTime<Utc>>,
    pub home_team: Team,
    pub away_team: Team,
    #[serde(default)]
    pub odds: Option<Bookmaker>,
    #[serde(default)]
    pub prediction: Option<Prediction>,
}

impl Fixture {
    pub fn team(&self, venue: Venue) -> &Team {
        match venue {
            Venue::Home => &self.home_team,
            Venue::Away => &self.away_team,
        }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.home_team.name, self.away_team.name)
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Outcome classification inferred from the match-winner odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchWinner {
    HomeWin,
    HomeOrDraw,
    Draw,
    AwayOrDraw,
    AwayWin,
}

impl MatchWinner {
    /// Parse an upstream winner code. Spaces are optional ("1N" == "1 N").
    pub fn from_code(code: &str) -> Option<Self> {
        let compact: String = code
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        match compact.as_str() {
            "1" => Some(MatchWinner::HomeWin),
            "1N" | "1X" => Some(MatchWinner::HomeOrDraw),
            "N" | "X" => Some(MatchWinner::Draw),
            "N2" | "X2" => Some(MatchWinner::AwayOrDraw),
            "2" => Some(MatchWinner::AwayWin),
            _ => None,
        }
    }
}

impl fmt::Display for MatchWinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchWinner::HomeWin => write!(f, "Home win"),
            MatchWinner::HomeOrDraw => write!(f, "Home win or draw"),
            MatchWinner::Draw => write!(f, "Draw"),
            MatchWinner::AwayOrDraw => write!(f, "Away win or draw"),
            MatchWinner::AwayWin => write!(f, "Away win"),
        }
    }
}

impl std::str::FromStr for MatchWinner {
    type Err = ScoutError;

    /// Accepts upstream codes as well as variant names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(w) = Self::from_code(s) {
            return Ok(w);
        }
        let normalised: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalised.as_str() {
            "home" | "homewin" => Ok(MatchWinner::HomeWin),
            "homeordraw" | "homewinordraw" => Ok(MatchWinner::HomeOrDraw),
            "draw" => Ok(MatchWinner::Draw),
            "awayordraw" | "awaywinordraw" => Ok(MatchWinner::AwayOrDraw),
            "away" | "awaywin" => Ok(MatchWinner::AwayWin),
            _ => Err(ScoutError::UnknownOutcome(s.to_string())),
        }
    }
}

/// How far the odd gap can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapTier {
    /// Gap at or above the trust level: a clear favourite.
    Trusted,
    Standard,
    /// Gap below the too-small threshold: too risky to bet on.
    Risky,
}

impl fmt::Display for GapTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapTier::Trusted => write!(f, "trusted"),
            GapTier::Standard => write!(f, "standard"),
            GapTier::Risky => write!(f, "risky"),
        }
    }
}

/// A priced exact score from the bookmaker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedScore {
    pub home: u32,
    pub away: u32,
    pub odd: f64,
}

impl ExpectedScore {
    /// Parse a `"home:away"` label. Returns `None` for labels such as "Other".
    pub fn parse(label: &str, odd: f64) -> Option<Self> {
        let (home, away) = label.split_once(':')?;
        Some(Self {
            home: home.trim().parse().ok()?,
            away: away.trim().parse().ok()?,
            odd,
        })
    }

    /// Winner implied by the score itself; never an "or draw" outcome.
    pub fn winner(&self) -> MatchWinner {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => MatchWinner::HomeWin,
            std::cmp::Ordering::Less => MatchWinner::AwayWin,
            std::cmp::Ordering::Equal => MatchWinner::Draw,
        }
    }
}

impl fmt::Display for ExpectedScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.home, self.away)
    }
}

/// Odds-weighted expected goals for each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalRatio {
    pub home: f64,
    pub away: f64,
}

impl GoalRatio {
    pub fn new(home: f64, away: f64) -> Self {
        Self { home, away }
    }

    /// Goals expected to be scored by the given side.
    pub fn scored_by(&self, venue: Venue) -> f64 {
        match venue {
            Venue::Home => self.home,
            Venue::Away => self.away,
        }
    }

    /// Goals expected to be conceded by the given side.
    pub fn conceded_by(&self, venue: Venue) -> f64 {
        self.scored_by(venue.opposite())
    }
}

/// Result of interpreting a fixture's odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub odd_gap: f64,
    pub match_winner: MatchWinner,
    /// 0–100.
    pub confidence: u8,
    /// Cheapest first, at most four.
    pub expected_scores: Vec<ExpectedScore>,
    pub goal_ratio: GoalRatio,
    pub tier: GapTier,
}

impl StrategyResult {
    pub fn primary_score(&self) -> Option<&ExpectedScore> {
        self.expected_scores.first()
    }
}

/// Fantasy-point interval a team or player is expected to earn in one game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotentialScore {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

impl PotentialScore {
    /// Build an interval; `min` is pulled down to `max` if it would exceed it.
    pub fn new(min: f64, max: f64) -> Self {
        let min = min.min(max);
        Self {
            min,
            max,
            average: (min + max) / 2.0,
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl fmt::Display for PotentialScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} [{:.1}..{:.1}]", self.average, self.min, self.max)
    }
}

/// A fixture after the game sorter has run over it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFixture {
    pub fixture: Fixture,
    pub strategy: Option<StrategyResult>,
    pub home_score: Option<PotentialScore>,
    pub away_score: Option<PotentialScore>,
}

impl ScoredFixture {
    /// A fixture nothing could be computed for.
    pub fn unscored(fixture: Fixture) -> Self {
        Self {
            fixture,
            strategy: None,
            home_score: None,
            away_score: None,
        }
    }

    pub fn odd_gap(&self) -> Option<f64> {
        self.strategy.as_ref().map(|s| s.odd_gap)
    }

    pub fn score_for(&self, venue: Venue) -> Option<&PotentialScore> {
        match venue {
            Venue::Home => self.home_score.as_ref(),
            Venue::Away => self.away_score.as_ref(),
        }
    }
}

impl fmt::Display for ScoredFixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.strategy {
            Some(s) => write!(
                f,
                "{} ({} | gap {:.2} | {}% | {})",
                self.fixture, s.match_winner, s.odd_gap, s.confidence, s.tier
            ),
            None => write!(f, "{} (no strategy)", self.fixture),
        }
    }
}

/// A team paired with the fixture it plays this round.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamAndGame {
    pub team: Team,
    pub venue: Venue,
    pub game: Arc<ScoredFixture>,
}

impl TeamAndGame {
    pub fn new(game: Arc<ScoredFixture>, venue: Venue) -> Self {
        Self {
            team: game.fixture.team(venue).clone(),
            venue,
            game,
        }
    }

    pub fn potential_score(&self) -> Option<&PotentialScore> {
        self.game.score_for(self.venue)
    }

    pub fn strategy(&self) -> Option<&StrategyResult> {
        self.game.strategy.as_ref()
    }

    pub fn odd_gap(&self) -> Option<f64> {
        self.game.odd_gap()
    }

    pub fn opponent(&self) -> &Team {
        self.game.fixture.team(self.venue.opposite())
    }
}

impl Serialize for TeamAndGame {
    /// Flattened view: the full fixture is already part of the game ranking.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TeamAndGame", 6)?;
        s.serialize_field("team", &self.team)?;
        s.serialize_field("venue", &self.venue)?;
        s.serialize_field("fixture_id", &self.game.fixture.id)?;
        s.serialize_field("opponent", self.opponent())?;
        s.serialize_field("odd_gap", &self.odd_gap())?;
        s.serialize_field("potential_score", &self.potential_score())?;
        s.end()
    }
}

impl fmt::Display for TeamAndGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.potential_score() {
            Some(score) => write!(f, "{} ({} vs {}): {}", self.team, self.venue, self.opponent(), score),
            None => write!(f, "{} ({} vs {}): unranked", self.team, self.venue, self.opponent()),
        }
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Keeper,
    Back,
    Midfield,
    Striker,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Keeper,
        Position::Back,
        Position::Midfield,
        Position::Striker,
    ];
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Keeper => write!(f, "Keeper"),
            Position::Back => write!(f, "Back"),
            Position::Midfield => write!(f, "Midfield"),
            Position::Striker => write!(f, "Striker"),
        }
    }
}

impl std::str::FromStr for Position {
    type Err = ScoutError;

    /// Accepts English names and the fantasy league's French labels/letters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keeper" | "goalkeeper" | "gardien" | "g" => Ok(Position::Keeper),
            "back" | "defender" | "defenseur" | "défenseur" | "d" => Ok(Position::Back),
            "midfield" | "midfielder" | "milieu" | "m" => Ok(Position::Midfield),
            "striker" | "forward" | "attaquant" | "a" => Ok(Position::Striker),
            other => Err(ScoutError::UnknownPosition(other.to_string())),
        }
    }
}

/// Named criteria of the fantasy league's statistics feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatCriteria {
    GamesPlayed,
    GoalsConceded,
    Saves,
    GoalsScored,
    Assists,
    YellowCards,
    RedCards,
    Tackles,
    AveragePoints,
}

impl StatCriteria {
    /// Label used by the statistics feed.
    pub fn label(&self) -> &'static str {
        match self {
            StatCriteria::GamesPlayed => "Nombre de matchs",
            StatCriteria::GoalsConceded => "Buts encaissés",
            StatCriteria::Saves => "Arrêts",
            StatCriteria::GoalsScored => "Buts marqués",
            StatCriteria::Assists => "Passes décisives",
            StatCriteria::YellowCards => "Cartons jaunes",
            StatCriteria::RedCards => "Cartons rouges",
            StatCriteria::Tackles => "Tacles réussis",
            StatCriteria::AveragePoints => "Moyenne des points",
        }
    }
}

/// One raw `{message, value}` pair from the statistics feed. Values arrive
/// as numbers, numeric strings, or empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub message: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl StatEntry {
    pub fn new(criteria: StatCriteria, value: f64) -> Self {
        Self {
            message: criteria.label().to_string(),
            value: serde_json::json!(value),
        }
    }

    /// Numeric value; anything missing, unparsable or non-finite reads as 0.
    pub fn numeric(&self) -> f64 {
        let value = match &self.value {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().replace(',', ".").parse().ok(),
            _ => None,
        };
        value.filter(|v: &f64| v.is_finite()).unwrap_or(0.0)
    }
}

/// Season statistics of one player, keyed by name in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatsRecord {
    pub name: String,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

impl PlayerStatsRecord {
    pub fn new(name: impl Into<String>, stats: Vec<StatEntry>) -> Self {
        Self {
            name: name.into(),
            stats,
        }
    }

    pub fn read(&self, criteria: StatCriteria) -> f64 {
        let label = criteria.label();
        self.stats
            .iter()
            .find(|s| s.message == label)
            .map(StatEntry::numeric)
            .unwrap_or(0.0)
    }

    pub fn season_stats(&self) -> SeasonStats {
        SeasonStats {
            games_played: self.read(StatCriteria::GamesPlayed),
            goals_scored: self.read(StatCriteria::GoalsScored),
            goals_conceded: self.read(StatCriteria::GoalsConceded),
            saves: self.read(StatCriteria::Saves),
            assists: self.read(StatCriteria::Assists),
            yellow_cards: self.read(StatCriteria::YellowCards),
            red_cards: self.read(StatCriteria::RedCards),
            tackles: self.read(StatCriteria::Tackles),
        }
    }

    pub fn average_points(&self) -> f64 {
        self.read(StatCriteria::AveragePoints)
    }

    /// Name comparison used to join the roster with the statistics feed.
    pub fn matches(&self, player_name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(player_name.trim())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub games_played: f64,
    pub goals_scored: f64,
    pub goals_conceded: f64,
    pub saves: f64,
    pub assists: f64,
    pub yellow_cards: f64,
    pub red_cards: f64,
    pub tackles: f64,
}

impl SeasonStats {
    /// Per-game rate of a counted stat; 0 when no game was played.
    pub fn per_game(&self, total: f64) -> f64 {
        if self.games_played > 0.0 {
            total / self.games_played
        } else {
            0.0
        }
    }
}

/// A fantasy player as listed on a club roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u64,
    pub name: String,
    pub club: String,
    /// Market value in the fantasy league.
    pub value: f64,
    pub position: Position,
}

/// A roster player joined with its stats, its game and its computed score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPlayer {
    pub player: Player,
    pub stats: SeasonStats,
    pub average_points: f64,
    pub team_and_game: TeamAndGame,
    pub potential_score: Option<PotentialScore>,
}

impl ScoredPlayer {
    pub fn odd_gap(&self) -> Option<f64> {
        self.team_and_game.odd_gap()
    }
}

impl fmt::Display for ScoredPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {:.1}M) avg {:.1}pts",
            self.player.name, self.player.club, self.player.value, self.average_points
        )?;
        if let Some(score) = &self.potential_score {
            write!(f, " -> {score}")?;
        }
        Ok(())
    }
}

/// Ranked candidate pools, one per position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerPools {
    pub keepers: Vec<ScoredPlayer>,
    pub backs: Vec<ScoredPlayer>,
    pub midfields: Vec<ScoredPlayer>,
    pub strikers: Vec<ScoredPlayer>,
}

impl PlayerPools {
    pub fn pool(&self, position: Position) -> &[ScoredPlayer] {
        match position {
            Position::Keeper => &self.keepers,
            Position::Back => &self.backs,
            Position::Midfield => &self.midfields,
            Position::Striker => &self.strikers,
        }
    }

    pub fn pool_mut(&mut self, position: Position) -> &mut Vec<ScoredPlayer> {
        match position {
            Position::Keeper => &mut self.keepers,
            Position::Back => &mut self.backs,
            Position::Midfield => &mut self.midfields,
            Position::Striker => &mut self.strikers,
        }
    }

    pub fn len(&self) -> usize {
        Position::ALL.iter().map(|p| self.pool(*p).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, player_id: u64) -> Option<&ScoredPlayer> {
        Position::ALL
            .iter()
            .flat_map(|p| self.pool(*p).iter())
            .find(|sp| sp.player.id == player_id)
    }
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Fixture has no bookmaker odds at all.
    MissingOdds,
    /// Odds exist but carry no match-winner market.
    MissingMatchWinner,
    MalformedOdds,
    /// A roster or statistics fetch failed for a team.
    SourceFailure,
}

/// Non-fatal condition reported back to the caller alongside a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingWarning {
    pub kind: WarningKind,
    /// Fixture or team the warning is about.
    pub subject: String,
    pub message: String,
    /// Upstream failure behind a `SourceFailure` warning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_error: Option<SourceError>,
}

impl RankingWarning {
    pub fn new(kind: WarningKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
            source_error: None,
        }
    }

    pub fn source_failure(subject: impl Into<String>, error: SourceError) -> Self {
        Self {
            kind: WarningKind::SourceFailure,
            subject: subject.into(),
            message: error.to_string(),
            source_error: Some(error),
        }
    }
}

impl fmt::Display for RankingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}: {}", self.kind, self.subject, self.message)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Failure of an upstream collaborator (fixtures, odds or fantasy API).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum SourceError {
    #[error("Rate limited by {source_name}")]
    RateLimited { source_name: String },

    #[error("Not authorised by {source_name}: {message}")]
    Unauthorized { source_name: String, message: String },

    #[error("Transport error ({source_name}): {message}")]
    Transport { source_name: String, message: String },

    #[error("Not found ({source_name}): {message}")]
    NotFound { source_name: String, message: String },

    #[error("Unexpected response from {source_name}: {message}")]
    Decode { source_name: String, message: String },
}

/// Domain-specific error types for SCOUTBOT.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error("Malformed odds: {0}")]
    MalformedOdds(String),

    #[error("Invalid decimal odd: {0:?}")]
    InvalidOdd(String),

    #[error("Unknown match outcome: {0}")]
    UnknownOutcome(String),

    #[error("Unknown player position: {0}")]
    UnknownPosition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
