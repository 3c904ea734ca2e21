use arena_gameplay::MultiActionRecord;
use serde::Serialize;

/// One flushed hand's chip distribution, retained for the stats ring
/// buffer, per §4.10.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub hand_number: u64,
    pub pot_total: i64,
    pub winner_count: usize,
}

/// One hand's winner list, retained for the win-rate history ring
/// buffer; clients derive an actual rate from the sequence themselves.
#[derive(Debug, Clone, Serialize)]
pub struct WinRateEntry {
    pub hand_number: u64,
    pub winners: Vec<String>,
}

/// Wire payload pushed to dashboard subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    ActionLogged(MultiActionRecord),
    HandStats(StatsSnapshot),
    WinRate(WinRateEntry),
    PlayerTurn { table_id: String, seat_index: usize },
    SettlementError { reason: String },
}

/// Synthesised payload handed to a subscriber at subscribe time,
/// assembled from the channel's retained buffers per §4.10.
#[derive(Debug, Clone, Serialize)]
pub struct InitialState {
    pub table_id: String,
    pub action_log: Vec<MultiActionRecord>,
    pub stats_history: Vec<StatsSnapshot>,
    pub win_rate_history: Vec<WinRateEntry>,
}
