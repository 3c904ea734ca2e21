use arena_core::Chips;
use arena_core::Millis;
use serde::Deserialize;
use serde::Serialize;

use crate::action::Action;
use crate::phase::ArenaGamePhase;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiActionRecord {
    pub player_id: String,
    pub player_name: String,
    pub action: Action,
    pub amount: Chips,
    pub phase: ArenaGamePhase,
    pub seat_index: usize,
    pub timestamp_ms: Millis,
}

impl MultiActionRecord {
    /// Canonical `|`-joined serialisation used as the Merkle leaf input
    /// (§4.9/§6): `playerId:action:amount:phase:timestamp`.
    pub fn canonical_string(&self) -> String {
        format!(
            "{}:{}:{}:{:?}:{}",
            self.player_id, self.action, self.amount, self.phase, self.timestamp_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_string_is_colon_joined() {
        let record = MultiActionRecord {
            player_id: "p1".into(),
            player_name: "Alice".into(),
            action: Action::Raise,
            amount: 20,
            phase: ArenaGamePhase::Preflop,
            seat_index: 0,
            timestamp_ms: 1234,
        };
        assert_eq!(record.canonical_string(), "p1:RAISE:20:Preflop:1234");
    }
}
