use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::dao::models::PlayerStats;

/// A player's recorded answers and running total.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Player the stats belong to.
    pub player_id: String,
    /// Accepted offer per question id; `0` means the player said no.
    pub answered: BTreeMap<String, u64>,
    /// Sum of every recorded offer.
    pub total_money: u64,
}

impl From<(String, PlayerStats)> for StatsResponse {
    fn from((player_id, stats): (String, PlayerStats)) -> Self {
        let total_money = stats.total_money();
        Self {
            player_id,
            answered: stats.answered,
            total_money,
        }
    }
}

/// Result of a manual save.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveResponse {
    /// File the snapshot was written to.
    pub path: String,
    /// RFC 3339 timestamp of the save.
    pub saved_at: String,
}
