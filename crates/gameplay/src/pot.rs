use std::collections::BTreeSet;

use arena_core::Chips;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible_player_ids: BTreeSet<String>,
}
