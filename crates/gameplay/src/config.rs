use arena_core::Chips;
use arena_core::Millis;
use arena_core::DEFAULT_ACTION_TIMEOUT_MS;
use arena_core::MAX_PLAYERS_PER_TABLE;
use arena_core::MIN_PLAYERS_PER_TABLE;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub table_id: String,
    pub table_name: String,
    pub max_players: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub starting_stack: Chips,
    pub action_timeout_ms: Millis,
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_PLAYERS_PER_TABLE..=MAX_PLAYERS_PER_TABLE).contains(&self.max_players) {
            return Err(format!(
                "max_players must be in [{MIN_PLAYERS_PER_TABLE}, {MAX_PLAYERS_PER_TABLE}]"
            ));
        }
        if self.small_blind <= 0 {
            return Err("small_blind must be > 0".into());
        }
        if self.big_blind < 2 * self.small_blind {
            return Err("big_blind must be >= 2 * small_blind".into());
        }
        if self.starting_stack <= 0 {
            return Err("starting_stack must be > 0".into());
        }
        if self.action_timeout_ms == 0 {
            return Err("action_timeout_ms must be > 0".into());
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            table_id: String::new(),
            table_name: "table".to_string(),
            max_players: 6,
            small_blind: 5,
            big_blind: 10,
            starting_stack: 1000,
            action_timeout_ms: DEFAULT_ACTION_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TableConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_big_blind_less_than_double_small_blind() {
        let mut config = TableConfig::default();
        config.big_blind = config.small_blind + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_max_players() {
        let mut config = TableConfig::default();
        config.max_players = 7;
        assert!(config.validate().is_err());
    }
}
