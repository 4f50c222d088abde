//! Review of the manager's current squad against the ranked pools.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{PlayerPools, Position, ScoredPlayer};

/// A player currently in the manager's squad, as listed by the league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadEntry {
    pub player_id: u64,
    pub name: String,
    #[serde(default)]
    pub club: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SquadSlot {
    /// Found in the ranked pools.
    Ranked { player: ScoredPlayer },
    /// Not among this round's candidates.
    Unranked { entry: SquadEntry },
}

impl SquadSlot {
    pub fn is_scored(&self) -> bool {
        matches!(self, SquadSlot::Ranked { player } if player.potential_score.is_some())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SquadReview {
    pub slots: Vec<SquadSlot>,
    /// Squad players with no potential score this round: their team is
    /// expected to lose or was not ranked at all.
    pub likely_losers: Vec<SquadEntry>,
}

/// Swap each squad entry for its ranked counterpart and list the players
/// not expected to score.
pub fn review_squad(squad: &[SquadEntry], pools: &PlayerPools) -> SquadReview {
    let mut review = SquadReview::default();

    for entry in squad {
        let found = pools
            .pool(entry.position)
            .iter()
            .find(|p| p.player.id == entry.player_id);

        let slot = match found {
            Some(player) => SquadSlot::Ranked {
                player: player.clone(),
            },
            None => SquadSlot::Unranked {
                entry: entry.clone(),
            },
        };
        if !slot.is_scored() {
            review.likely_losers.push(entry.clone());
        }
        review.slots.push(slot);
    }

    info!(
        squad = squad.len(),
        losers = review.likely_losers.len(),
        "Squad reviewed"
    );
    review
}
