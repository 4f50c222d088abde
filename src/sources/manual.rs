//! Manual outcome table.
//!
//! Outcomes keyed by fixture id, read from the `[manual_outcomes]`
//! section of the config file:
//!
//! ```toml
//! [manual_outcomes]
//! 592148 = "1"
//! 592151 = "N 2"
//! ```

use std::collections::HashMap;
use tracing::debug;

use super::ManualOutcomeProvider;
use crate::types::{Fixture, MatchWinner, ScoutError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualOutcomeTable {
    outcomes: HashMap<u64, MatchWinner>,
}

impl ManualOutcomeTable {
    pub fn new(outcomes: HashMap<u64, MatchWinner>) -> Self {
        Self { outcomes }
    }

    /// Build from raw config entries. Keys are fixture ids, values are
    /// winner codes or outcome names.
    pub fn from_config(raw: &HashMap<String, String>) -> Result<Self, ScoutError> {
        let mut outcomes = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let fixture_id: u64 = key.trim().parse().map_err(|_| {
                ScoutError::Config(format!("manual_outcomes key {key:?} is not a fixture id"))
            })?;
            outcomes.insert(fixture_id, value.parse::<MatchWinner>()?);
        }
        Ok(Self { outcomes })
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl ManualOutcomeProvider for ManualOutcomeTable {
    fn outcome_for(&self, fixture: &Fixture) -> Option<MatchWinner> {
        let outcome = self.outcomes.get(&fixture.id).copied();
        if let Some(o) = outcome {
            debug!(fixture_id = fixture.id, outcome = %o, "Manual outcome found");
        }
        outcome
    }
}
