//! Fantasy-point rule table.
//!
//! Point values awarded per event by the fantasy league. Pure data: the
//! score calculator reads it, the config file may override any entry.

use serde::Deserialize;

use crate::types::{MatchWinner, Venue};

// ---------------------------------------------------------------------------
// Rule sections
// ---------------------------------------------------------------------------

/// Team result points. Away results are worth more than home ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TeamRules {
    pub home_win: f64,
    pub home_draw: f64,
    pub home_loss: f64,
    pub away_win: f64,
    pub away_draw: f64,
    pub away_loss: f64,
    pub points_per_goal_difference: f64,
}

impl Default for TeamRules {
    fn default() -> Self {
        Self {
            home_win: 8.0,
            home_draw: 2.0,
            home_loss: -2.0,
            away_win: 12.0,
            away_draw: 6.0,
            away_loss: 2.0,
            points_per_goal_difference: 2.0,
        }
    }
}

impl TeamRules {
    fn win(&self, venue: Venue) -> f64 {
        match venue {
            Venue::Home => self.home_win,
            Venue::Away => self.away_win,
        }
    }

    fn draw(&self, venue: Venue) -> f64 {
        match venue {
            Venue::Home => self.home_draw,
            Venue::Away => self.away_draw,
        }
    }

    fn loss(&self, venue: Venue) -> f64 {
        match venue {
            Venue::Home => self.home_loss,
            Venue::Away => self.away_loss,
        }
    }

    /// Base `(min, max)` points for one side under an outcome classification.
    pub fn base_range(&self, outcome: MatchWinner, venue: Venue) -> (f64, f64) {
        let home = venue == Venue::Home;
        match outcome {
            MatchWinner::HomeWin if home => (self.win(venue), self.win(venue)),
            MatchWinner::HomeWin => (self.loss(venue), self.loss(venue)),
            MatchWinner::HomeOrDraw if home => (self.draw(venue), self.win(venue)),
            MatchWinner::HomeOrDraw => (self.loss(venue), self.draw(venue)),
            MatchWinner::AwayWin if home => (self.loss(venue), self.loss(venue)),
            MatchWinner::AwayWin => (self.win(venue), self.win(venue)),
            MatchWinner::AwayOrDraw if home => (self.loss(venue), self.draw(venue)),
            MatchWinner::AwayOrDraw => (self.draw(venue), self.win(venue)),
            MatchWinner::Draw => (self.draw(venue), self.draw(venue)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeeperRules {
    pub invincibility: f64,
    /// Opponent goal ratio at or below which a clean sheet is expected.
    pub invincibility_goal_ratio: f64,
}

impl Default for KeeperRules {
    fn default() -> Self {
        Self {
            invincibility: 12.0,
            invincibility_goal_ratio: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackRules {
    pub goal: f64,
    pub tackle: f64,
    pub invincibility: f64,
    pub invincibility_goal_ratio: f64,
}

impl Default for BackRules {
    fn default() -> Self {
        Self {
            goal: 18.0,
            tackle: 1.0,
            invincibility: 6.0,
            invincibility_goal_ratio: 0.4,
        }
    }
}

/// Points table shared by the attacking positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackerRules {
    pub goal: f64,
    pub assist: f64,
    pub tackle: f64,
    pub yellow_card_penalty: f64,
    pub red_card_penalty: f64,
}

impl AttackerRules {
    pub fn midfield() -> Self {
        Self {
            goal: 15.0,
            ..Self::striker()
        }
    }

    pub fn striker() -> Self {
        Self {
            goal: 12.0,
            assist: 5.0,
            tackle: 1.0,
            yellow_card_penalty: 2.0,
            red_card_penalty: 5.0,
        }
    }
}

/// Attacker entries as written in the config file. Missing entries fall
/// back to the position's own defaults.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct AttackerOverrides {
    goal: Option<f64>,
    assist: Option<f64>,
    tackle: Option<f64>,
    yellow_card_penalty: Option<f64>,
    red_card_penalty: Option<f64>,
}

impl AttackerOverrides {
    fn over(self, base: AttackerRules) -> AttackerRules {
        AttackerRules {
            goal: self.goal.unwrap_or(base.goal),
            assist: self.assist.unwrap_or(base.assist),
            tackle: self.tackle.unwrap_or(base.tackle),
            yellow_card_penalty: self.yellow_card_penalty.unwrap_or(base.yellow_card_penalty),
            red_card_penalty: self.red_card_penalty.unwrap_or(base.red_card_penalty),
        }
    }
}

// ---------------------------------------------------------------------------
// Full table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawScoreRules")]
pub struct ScoreRules {
    pub team: TeamRules,
    pub keeper: KeeperRules,
    pub back: BackRules,
    pub midfield: AttackerRules,
    pub striker: AttackerRules,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            team: TeamRules::default(),
            keeper: KeeperRules::default(),
            back: BackRules::default(),
            midfield: AttackerRules::midfield(),
            striker: AttackerRules::striker(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawScoreRules {
    team: TeamRules,
    keeper: KeeperRules,
    back: BackRules,
    midfield: AttackerOverrides,
    striker: AttackerOverrides,
}

impl From<RawScoreRules> for ScoreRules {
    fn from(raw: RawScoreRules) -> Self {
        Self {
            team: raw.team,
            keeper: raw.keeper,
            back: raw.back,
            midfield: raw.midfield.over(AttackerRules::midfield()),
            striker: raw.striker.over(AttackerRules::striker()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
