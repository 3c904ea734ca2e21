use arena_core::ArenaError;
use arena_core::ArenaResult;
use arena_core::Chips;
use arena_core::Millis;
use arena_core::DEAL_RETRY_DELAY_MS;
use arena_core::MAX_TABLE_COUNT;
use arena_core::MIN_TABLE_COUNT;
use serde::Deserialize;
use serde::Serialize;

/// Configuration consumed by the Arena orchestrator (C10), per §6's
/// configuration table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArenaConfig {
    pub bot_count: usize,
    pub max_hands: u64,
    pub hand_delay_ms: Millis,
    pub action_delay_ms: Millis,
    pub phase_delay_ms: Millis,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub starting_stack: Chips,
    pub action_timeout_ms: Millis,
    pub table_count: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            bot_count: 5,
            max_hands: 100,
            hand_delay_ms: 1_000,
            action_delay_ms: 500,
            phase_delay_ms: 500,
            small_blind: 5,
            big_blind: 10,
            starting_stack: 1_000,
            action_timeout_ms: 30_000,
            table_count: 1,
        }
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> ArenaResult<()> {
        if !(MIN_TABLE_COUNT..=MAX_TABLE_COUNT).contains(&self.table_count) {
            return Err(ArenaError::validation(format!(
                "tableCount must be within [{MIN_TABLE_COUNT}, {MAX_TABLE_COUNT}]"
            )));
        }
        if self.max_hands == 0 {
            return Err(ArenaError::validation("maxHands must be positive"));
        }
        if self.big_blind < 2 * self.small_blind {
            return Err(ArenaError::validation("bigBlind must be at least twice smallBlind"));
        }
        Ok(())
    }

    /// Per-table hand cap: `ceil(maxHands / tableCount)`.
    pub fn hands_per_table(&self) -> u64 {
        (self.max_hands + self.table_count as u64 - 1) / self.table_count as u64
    }

    pub fn deal_retry_delay_ms(&self) -> Millis {
        DEAL_RETRY_DELAY_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ArenaConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_table_count() {
        let mut config = ArenaConfig::default();
        config.table_count = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn hands_per_table_rounds_up() {
        let mut config = ArenaConfig::default();
        config.max_hands = 10;
        config.table_count = 3;
        assert_eq!(config.hands_per_table(), 4);
    }
}
