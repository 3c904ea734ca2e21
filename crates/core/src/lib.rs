mod error;
mod id;

pub use error::ArenaError;
pub use error::ArenaResult;
pub use id::Unique;
pub use id::ID;

/// Chip amounts. Signed so settlement chip-deltas (§6) can go negative;
/// seat-level stacks and pot amounts are validated non-negative at
/// construction and by the invariants they participate in.
pub type Chips = i64;

/// Milliseconds, used for every timeout/delay field in the configs.
pub type Millis = u64;

// ===== DEFAULTS =====
// Named defaults for every timeout/config knob the core consumes (§5, §6).

pub const DEFAULT_ACTION_TIMEOUT_MS: Millis = 30_000;
pub const DEFAULT_CALLBACK_TIMEOUT_MS: Millis = 10_000;
pub const DEFAULT_CALLBACK_RETRIES: u32 = 2;
pub const CALLBACK_BACKOFF_MS: Millis = 2_000;
pub const DEFAULT_FLUSH_INTERVAL_MS: Millis = 60_000;
pub const DEFAULT_RETRY_COUNT: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: Millis = 1_000;
pub const DEFAULT_BATCH_SIZE: usize = 20;
pub const LATENCY_RING_CAPACITY: usize = 50;
pub const ACTION_LOG_RETAINED: usize = 200;
pub const STATS_RETAINED: usize = 500;
pub const MIN_PLAYERS_PER_TABLE: usize = 2;
pub const MAX_PLAYERS_PER_TABLE: usize = 6;
pub const MIN_TABLE_COUNT: usize = 1;
pub const MAX_TABLE_COUNT: usize = 4;
pub const DEAL_RETRY_DELAY_MS: Millis = 1_000;

/// Wires a dual terminal+file logger the way a long-running service
/// wants it: human-readable on stderr, full detail in the log file.
/// Call once at process start; safe to call more than once in tests
/// because failures are swallowed (a second logger install is a no-op
/// error, not a crash).
pub fn init_logging(log_path: &str) {
    use simplelog::ColorChoice;
    use simplelog::CombinedLogger;
    use simplelog::Config;
    use simplelog::LevelFilter;
    use simplelog::TermLogger;
    use simplelog::TerminalMode;
    use simplelog::WriteLogger;

    let term = TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    let file = std::fs::File::create(log_path)
        .ok()
        .map(|f| WriteLogger::new(LevelFilter::Debug, Config::default(), f));
    let loggers: Vec<Box<dyn simplelog::SharedLogger>> = match file {
        Some(f) => vec![term, f],
        None => vec![term],
    };
    let _ = CombinedLogger::init(loggers);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_constants() {
        assert_eq!(DEFAULT_ACTION_TIMEOUT_MS, 30_000);
        assert_eq!(DEFAULT_CALLBACK_TIMEOUT_MS, 10_000);
        assert_eq!(DEFAULT_CALLBACK_RETRIES, 2);
        assert_eq!(DEFAULT_FLUSH_INTERVAL_MS, 60_000);
    }
}
