//! Strategy engine: odds interpretation, the fantasy rule table and
//! potential-score computation.
//!
//! Everything in here is pure: no I/O, no shared state. The engine
//! module feeds fixtures and player statistics through it.

pub mod odds;
pub mod rules;
pub mod score;

pub use odds::{OddsConfig, OddsInterpreter};
pub use rules::ScoreRules;
pub use score::ScoreCalculator;
