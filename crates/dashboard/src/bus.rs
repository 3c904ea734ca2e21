use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Mutex;

use arena_core::ACTION_LOG_RETAINED;
use arena_core::STATS_RETAINED;
use arena_gameplay::HandResult;
use arena_gameplay::MultiActionRecord;
use arena_orchestrator::DashboardSink;
use arena_orchestrator::SettlementErrorSink;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::DashboardEvent;
use crate::event::InitialState;
use crate::event::StatsSnapshot;
use crate::event::WinRateEntry;

fn push_bounded<T>(buf: &mut VecDeque<T>, capacity: usize, item: T) {
    buf.push_back(item);
    if buf.len() > capacity {
        buf.pop_front();
    }
}

struct Channel {
    subscribers: Vec<UnboundedSender<DashboardEvent>>,
    action_log: VecDeque<MultiActionRecord>,
    stats_history: VecDeque<StatsSnapshot>,
    win_rate_history: VecDeque<WinRateEntry>,
}

impl Channel {
    fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            action_log: VecDeque::new(),
            stats_history: VecDeque::new(),
            win_rate_history: VecDeque::new(),
        }
    }

    /// Drops disconnected subscribers as it goes; a send failure never
    /// blocks or panics the producer.
    fn broadcast(&mut self, event: DashboardEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

/// Named, bounded retained-buffer publish/subscribe bus (C13), one
/// channel per table. Implements `DashboardSink` so an `Arena` can
/// forward hand results and turn notifications through it without
/// depending on this crate's own types.
pub struct DashboardBus {
    channels: Mutex<HashMap<String, Channel>>,
}

impl DashboardBus {
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a subscriber for `table_id` and returns its receiver
    /// plus a synthesised initial-state payload from the retained
    /// buffers, per §4.10.
    pub fn subscribe(&self, table_id: &str) -> (UnboundedReceiver<DashboardEvent>, InitialState) {
        let mut channels = self.channels.lock().unwrap();
        let channel = channels.entry(table_id.to_string()).or_insert_with(Channel::new);
        let (tx, rx) = unbounded_channel();
        channel.subscribers.push(tx);
        let initial = InitialState {
            table_id: table_id.to_string(),
            action_log: channel.action_log.iter().cloned().collect(),
            stats_history: channel.stats_history.iter().cloned().collect(),
            win_rate_history: channel.win_rate_history.iter().cloned().collect(),
        };
        (rx, initial)
    }
}

impl Default for DashboardBus {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardSink for DashboardBus {
    fn publish_hand_result(&self, table_id: &str, result: &HandResult) {
        let mut channels = self.channels.lock().unwrap();
        let channel = channels.entry(table_id.to_string()).or_insert_with(Channel::new);

        for record in &result.action_log {
            push_bounded(&mut channel.action_log, ACTION_LOG_RETAINED, record.clone());
            channel.broadcast(DashboardEvent::ActionLogged(record.clone()));
        }

        let pot_total: i64 = result.winners.iter().map(|w| w.amount).sum();
        let stats = StatsSnapshot {
            hand_number: result.hand_number,
            pot_total,
            winner_count: result.winners.len(),
        };
        push_bounded(&mut channel.stats_history, STATS_RETAINED, stats.clone());
        channel.broadcast(DashboardEvent::HandStats(stats));

        let win_rate = WinRateEntry {
            hand_number: result.hand_number,
            winners: result.winners.iter().map(|w| w.player_id.clone()).collect(),
        };
        push_bounded(&mut channel.win_rate_history, STATS_RETAINED, win_rate.clone());
        channel.broadcast(DashboardEvent::WinRate(win_rate));
    }

    fn publish_player_turn(&self, table_id: &str, seat_index: usize) {
        let mut channels = self.channels.lock().unwrap();
        if let Some(channel) = channels.get_mut(table_id) {
            channel.broadcast(DashboardEvent::PlayerTurn {
                table_id: table_id.to_string(),
                seat_index,
            });
        }
    }
}

impl SettlementErrorSink for DashboardBus {
    fn publish_settlement_error(&self, room_id: &str, reason: &str) {
        let mut channels = self.channels.lock().unwrap();
        if let Some(channel) = channels.get_mut(room_id) {
            channel.broadcast(DashboardEvent::SettlementError {
                reason: reason.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_gameplay::WinnerShare;

    fn hand(n: u64) -> HandResult {
        HandResult {
            table_id: "t1".into(),
            hand_number: n,
            winners: vec![WinnerShare {
                player_id: "p1".into(),
                amount: 50,
                description: "pair of kings".into(),
            }],
            action_log: vec![],
        }
    }

    #[test]
    fn new_subscriber_receives_retained_buffers_as_initial_state() {
        let bus = DashboardBus::new();
        bus.publish_hand_result("t1", &hand(1));
        bus.publish_hand_result("t1", &hand(2));

        let (_rx, initial) = bus.subscribe("t1");
        assert_eq!(initial.stats_history.len(), 2);
        assert_eq!(initial.win_rate_history.len(), 2);
    }

    #[test]
    fn stats_history_trims_oldest_beyond_capacity() {
        let bus = DashboardBus::new();
        for n in 0..(STATS_RETAINED as u64 + 10) {
            bus.publish_hand_result("t1", &hand(n));
        }
        let (_rx, initial) = bus.subscribe("t1");
        assert_eq!(initial.stats_history.len(), STATS_RETAINED);
        assert_eq!(initial.stats_history.first().unwrap().hand_number, 10);
    }

    #[test]
    fn publish_does_not_block_when_a_subscriber_channel_is_dropped() {
        let bus = DashboardBus::new();
        let (rx, _initial) = bus.subscribe("t1");
        drop(rx);
        bus.publish_hand_result("t1", &hand(1));
        bus.publish_player_turn("t1", 2);
    }

    #[test]
    fn settlement_error_reaches_the_tables_subscribers() {
        let bus = DashboardBus::new();
        let (mut rx, _initial) = bus.subscribe("t1");
        bus.publish_settlement_error("t1", "ledger unreachable");
        let event = rx.try_recv().expect("subscriber should observe the error");
        match event {
            DashboardEvent::SettlementError { reason } => assert_eq!(reason, "ledger unreachable"),
            other => panic!("expected SettlementError, got {other:?}"),
        }
    }
}
