use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Full snapshot persisted to disk, keyed by player identifier.
pub type StatsSnapshot = HashMap<String, PlayerStats>;

/// Answers recorded for a single player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Accepted offer per question id, in whole dollars. A "no" is stored as `0`.
    #[serde(default)]
    pub answered: BTreeMap<String, u64>,
}

impl PlayerStats {
    /// Sum of every recorded offer, recomputed on each call.
    ///
    /// The sum saturates: a total past `u64::MAX` is reported as `u64::MAX`.
    pub fn total_money(&self) -> u64 {
        self.answered
            .values()
            .fold(0u64, |total, offer| total.saturating_add(*offer))
    }

    /// Whether the player answered `question_id`, including with a "no".
    pub fn has_answered(&self, question_id: &str) -> bool {
        self.answered.contains_key(question_id)
    }
}

/// A question of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Identifier, unique within the corpus.
    pub id: String,
    /// Text completing "you get a million dollars, but...".
    pub text: String,
}
