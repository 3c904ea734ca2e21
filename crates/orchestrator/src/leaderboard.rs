use std::collections::HashMap;

use serde::Serialize;

/// The external leaderboard collaborator, called through the narrow
/// interface named in the design notes (§9): no locking semantics are
/// required of the core beyond serialising calls per Arena instance.
pub trait LeaderboardSink: Send + Sync {
    fn record_result(&self, player_id: &str, name: &str, kind: &str, style: &str, won: bool, amount: i64);
}

/// Default sink used when the caller does not wire an external one.
pub struct NoopLeaderboard;

impl LeaderboardSink for NoopLeaderboard {
    fn record_result(&self, _player_id: &str, _name: &str, _kind: &str, _style: &str, _won: bool, _amount: i64) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardSortBy {
    WinRate,
    Profit,
    Hands,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_id: String,
    pub name: String,
    pub hands_played: u64,
    pub hands_won: u64,
    pub profit: i64,
}

impl LeaderboardEntry {
    pub fn win_rate(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            self.hands_won as f64 / self.hands_played as f64
        }
    }
}

/// In-process tally the Arena maintains alongside whatever external
/// `LeaderboardSink` it forwards results to, so `getLeaderboard` can
/// answer without a round trip to that collaborator.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardTally {
    entries: HashMap<String, LeaderboardEntry>,
}

impl LeaderboardTally {
    pub fn record(&mut self, player_id: &str, name: &str, won: bool, amount: i64) {
        let entry = self.entries.entry(player_id.to_string()).or_insert_with(|| LeaderboardEntry {
            player_id: player_id.to_string(),
            name: name.to_string(),
            hands_played: 0,
            hands_won: 0,
            profit: 0,
        });
        entry.hands_played += 1;
        if won {
            entry.hands_won += 1;
        }
        entry.profit += amount;
    }

    pub fn sorted(&self, sort_by: LeaderboardSortBy) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = self.entries.values().cloned().collect();
        entries.sort_by(|a, b| match sort_by {
            LeaderboardSortBy::WinRate => b.win_rate().partial_cmp(&a.win_rate()).unwrap(),
            LeaderboardSortBy::Profit => b.profit.cmp(&a.profit),
            LeaderboardSortBy::Hands => b.hands_played.cmp(&a.hands_played),
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_by_profit_descending() {
        let mut tally = LeaderboardTally::default();
        tally.record("a", "Alice", true, 100);
        tally.record("b", "Bob", false, -50);
        let sorted = tally.sorted(LeaderboardSortBy::Profit);
        assert_eq!(sorted[0].player_id, "a");
    }

    #[test]
    fn win_rate_divides_wins_by_hands_played() {
        let mut tally = LeaderboardTally::default();
        tally.record("a", "Alice", true, 10);
        tally.record("a", "Alice", false, -10);
        let entry = tally.sorted(LeaderboardSortBy::Hands).remove(0);
        assert_eq!(entry.win_rate(), 0.5);
    }
}
