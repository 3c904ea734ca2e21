use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use arena_agents::AgentRegistry;
use arena_bots::decide as bot_decide;
use arena_bots::Archetype;
use arena_core::ArenaError;
use arena_core::ArenaResult;
use arena_core::MAX_PLAYERS_PER_TABLE;
use arena_gameplay::HandResult;
use arena_gameplay::TableConfig;
use arena_gameroom::Event;
use arena_gameroom::Table;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tokio::time::sleep_until;
use tokio::time::Duration;
use tokio::time::Instant;

use crate::config::ArenaConfig;
use crate::leaderboard::LeaderboardSink;
use crate::leaderboard::LeaderboardSortBy;
use crate::leaderboard::LeaderboardEntry;
use crate::leaderboard::LeaderboardTally;
use crate::leaderboard::NoopLeaderboard;
use crate::sinks::DashboardSink;
use crate::sinks::SettlementSink;
use crate::status::ArenaStatus;
use crate::status::TableStatus;

type SeatKey = (String, String);

/// The Arena orchestrator (C10): seats registered agents and bots
/// across `tableCount` tables, drives one hand loop per table
/// concurrently, and aggregates results per §4.8.
pub struct Arena {
    config: ArenaConfig,
    registry: Arc<AgentRegistry>,
    leaderboard: Arc<dyn LeaderboardSink>,
    settlement: Option<Arc<dyn SettlementSink>>,
    dashboard: Option<Arc<dyn DashboardSink>>,
    tables: Vec<Arc<Mutex<Table>>>,
    table_ids: Vec<String>,
    bot_archetypes: HashMap<SeatKey, Archetype>,
    hands_played: Vec<Arc<AtomicU64>>,
    running: Arc<AtomicBool>,
    active_tables: Arc<AtomicUsize>,
    tally: Arc<Mutex<LeaderboardTally>>,
}

impl Arena {
    pub fn new(config: ArenaConfig, registry: Arc<AgentRegistry>) -> ArenaResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry,
            leaderboard: Arc::new(NoopLeaderboard),
            settlement: None,
            dashboard: None,
            tables: Vec::new(),
            table_ids: Vec::new(),
            bot_archetypes: HashMap::new(),
            hands_played: Vec::new(),
            running: Arc::new(AtomicBool::new(false)),
            active_tables: Arc::new(AtomicUsize::new(0)),
            tally: Arc::new(Mutex::new(LeaderboardTally::default())),
        })
    }

    pub fn with_leaderboard(mut self, sink: Arc<dyn LeaderboardSink>) -> Self {
        self.leaderboard = sink;
        self
    }

    pub fn with_settlement(mut self, sink: Arc<dyn SettlementSink>) -> Self {
        self.settlement = Some(sink);
        self
    }

    pub fn with_dashboard(mut self, sink: Arc<dyn DashboardSink>) -> Self {
        self.dashboard = Some(sink);
        self
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Creates tables, seats agents then bots, and spawns one hand loop
    /// per table. Rejected if already running.
    pub async fn start(&mut self) -> ArenaResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(ArenaError::validation("arena already running"));
        }

        self.tables.clear();
        self.table_ids.clear();
        self.bot_archetypes.clear();
        self.hands_played.clear();

        let max_players = MAX_PLAYERS_PER_TABLE;
        for i in 0..self.config.table_count {
            let table_id = format!("table-{i}");
            let table_config = TableConfig {
                table_id: table_id.clone(),
                table_name: format!("Arena Table {i}"),
                max_players,
                small_blind: self.config.small_blind,
                big_blind: self.config.big_blind,
                starting_stack: self.config.starting_stack,
                action_timeout_ms: self.config.action_timeout_ms,
            };
            table_config
                .validate()
                .map_err(ArenaError::validation)?;
            self.tables.push(Arc::new(Mutex::new(Table::new(table_config))));
            self.table_ids.push(table_id);
            self.hands_played.push(Arc::new(AtomicU64::new(0)));
        }

        self.seat_agents_and_bots().await?;

        self.active_tables.store(self.tables.len(), Ordering::SeqCst);
        for i in 0..self.tables.len() {
            let table = self.tables[i].clone();
            let table_id = self.table_ids[i].clone();
            let hands_played = self.hands_played[i].clone();
            let hands_cap = self.config.hands_per_table();
            let config = self.config.clone();
            let registry = self.registry.clone();
            let bots = self.bot_archetypes.clone();
            let leaderboard = self.leaderboard.clone();
            let settlement = self.settlement.clone();
            let dashboard = self.dashboard.clone();
            let tally = self.tally.clone();
            let running = self.running.clone();
            let active_tables = self.active_tables.clone();

            tokio::spawn(async move {
                run_table_loop(
                    table, table_id, hands_played, hands_cap, config, registry, bots,
                    leaderboard, settlement, dashboard, tally, running.clone(),
                )
                .await;
                if active_tables.fetch_sub(1, Ordering::SeqCst) == 1 {
                    running.store(false, Ordering::SeqCst);
                }
            });
        }

        Ok(())
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    async fn seat_agents_and_bots(&mut self) -> ArenaResult<()> {
        let agents = self.registry.list_agents().await;
        let mut next_table = 0usize;
        for agent in &agents {
            let mut seated = false;
            for offset in 0..self.tables.len() {
                let idx = (next_table + offset) % self.tables.len();
                let mut table = self.tables[idx].lock().await;
                if table.seat_player(&agent.id, &agent.name).is_ok() {
                    drop(table);
                    self.registry
                        .bind_seat(&self.table_ids[idx], &agent.id, &agent.id)
                        .await;
                    next_table = idx + 1;
                    seated = true;
                    break;
                }
            }
            if !seated {
                log::warn!("[orchestrator] no seat available for agent {}", agent.id);
            }
        }

        for (table_idx, table) in self.tables.iter().enumerate() {
            let mut table = table.lock().await;
            for bot_n in 0..self.config.bot_count {
                let player_id = format!("bot-{table_idx}-{bot_n}");
                let archetype = Archetype::round_robin(bot_n);
                let name = format!("{archetype} Bot {bot_n}");
                match table.seat_player(&player_id, &name) {
                    Ok(_) => {
                        self.bot_archetypes
                            .insert((self.table_ids[table_idx].clone(), player_id), archetype);
                    }
                    Err(_) => break, // table is full
                }
            }
        }
        Ok(())
    }

    pub async fn get_status(&self) -> ArenaStatus {
        let mut tables = Vec::with_capacity(self.tables.len());
        for i in 0..self.tables.len() {
            let seated_players = self.tables[i]
                .lock()
                .await
                .snapshot()
                .seats
                .iter()
                .filter(|s| !s.is_empty())
                .count();
            tables.push(TableStatus {
                table_id: self.table_ids[i].clone(),
                hands_played: self.hands_played[i].load(Ordering::SeqCst),
                seated_players,
            });
        }
        ArenaStatus {
            running: self.is_running(),
            tables,
            total_hands_played: self.hands_played.iter().map(|h| h.load(Ordering::SeqCst)).sum(),
        }
    }

    pub async fn get_leaderboard(&self, sort_by: LeaderboardSortBy) -> Vec<LeaderboardEntry> {
        self.tally.lock().await.sorted(sort_by)
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_table_loop(
    table: Arc<Mutex<Table>>,
    table_id: String,
    hands_played: Arc<AtomicU64>,
    hands_cap: u64,
    config: ArenaConfig,
    registry: Arc<AgentRegistry>,
    bots: HashMap<SeatKey, Archetype>,
    leaderboard: Arc<dyn LeaderboardSink>,
    settlement: Option<Arc<dyn SettlementSink>>,
    dashboard: Option<Arc<dyn DashboardSink>>,
    tally: Arc<Mutex<LeaderboardTally>>,
    running: Arc<AtomicBool>,
) {
    while running.load(Ordering::SeqCst) && hands_played.load(Ordering::SeqCst) < hands_cap {
        let mut events = { table.lock().await.subscribe() };
        let dealt = { table.lock().await.deal_new_hand() };
        if dealt.is_err() {
            drop(events);
            sleep(Duration::from_millis(config.deal_retry_delay_ms())).await;
            continue;
        }

        loop {
            match events.recv().await {
                Some(Event::PlayerTurn { seat_index, .. }) => {
                    drive_turn(&table, &table_id, seat_index, &config, &registry, &bots).await;
                }
                Some(Event::PhaseChange { .. }) => {
                    sleep(Duration::from_millis(config.phase_delay_ms)).await;
                }
                Some(Event::HandComplete { winners, hand_number }) => {
                    let state = { table.lock().await.snapshot() };
                    let result = HandResult {
                        table_id: table_id.clone(),
                        hand_number,
                        winners: winners.clone(),
                        action_log: state.action_history.clone(),
                    };
                    let winner_ids: std::collections::HashSet<&str> =
                        winners.iter().map(|w| w.player_id.as_str()).collect();
                    let participants: Vec<String> = state
                        .seats
                        .iter()
                        .filter_map(|s| s.player_id.clone())
                        .collect();
                    {
                        let mut tally = tally.lock().await;
                        for player_id in &participants {
                            let won = winner_ids.contains(player_id.as_str());
                            let amount = winners
                                .iter()
                                .find(|w| &w.player_id == player_id)
                                .map(|w| w.amount)
                                .unwrap_or(0);
                            tally.record(player_id, player_id, won, amount);
                        }
                    }
                    for player_id in &participants {
                        let won = winner_ids.contains(player_id.as_str());
                        let amount = winners
                            .iter()
                            .find(|w| &w.player_id == player_id)
                            .map(|w| w.amount)
                            .unwrap_or(0);
                        let archetype = bots.get(&(table_id.clone(), player_id.clone()));
                        let kind = if archetype.is_some() { "BOT" } else { "AGENT" };
                        let style = archetype.map(|a| a.to_string()).unwrap_or_else(|| "N/A".to_string());
                        leaderboard.record_result(player_id, player_id, kind, &style, won, amount);
                    }
                    if let Some(dashboard) = &dashboard {
                        dashboard.publish_hand_result(&table_id, &result);
                    }
                    if let Some(settlement) = &settlement {
                        settlement.push_hand_result(&table_id, result).await;
                    }
                    hands_played.fetch_add(1, Ordering::SeqCst);
                    sleep(Duration::from_millis(config.hand_delay_ms)).await;
                    break;
                }
                Some(Event::WaitingForPlayers) | Some(Event::HandStart { .. }) | Some(Event::PlayerAction { .. }) => {
                    continue;
                }
                None => return,
            }
        }
    }
}

async fn drive_turn(
    table: &Arc<Mutex<Table>>,
    table_id: &str,
    seat_index: usize,
    config: &ArenaConfig,
    registry: &Arc<AgentRegistry>,
    bots: &HashMap<SeatKey, Archetype>,
) {
    let deadline = { table.lock().await.timer_deadline() };
    let turn = resolve_and_submit(table, table_id, seat_index, config, registry, bots);
    tokio::pin!(turn);

    if let Some(deadline) = deadline {
        tokio::select! {
            _ = sleep_until(deadline) => {
                let mut t = table.lock().await;
                if t.timer_deadline().map(|d| d <= Instant::now()).unwrap_or(false) {
                    let _ = t.apply_timeout();
                }
            }
            _ = &mut turn => {}
        }
    } else {
        turn.await;
    }
}

async fn resolve_and_submit(
    table: &Arc<Mutex<Table>>,
    table_id: &str,
    seat_index: usize,
    config: &ArenaConfig,
    registry: &Arc<AgentRegistry>,
    bots: &HashMap<SeatKey, Archetype>,
) {
    sleep(Duration::from_millis(config.action_delay_ms)).await;

    let (player_id, hand_number, view) = {
        let t = table.lock().await;
        match snapshot_turn(&t, seat_index) {
            Some(tuple) => tuple,
            None => return, // turn already moved on
        }
    };

    let agent_id = registry.get_agent_by_player_id(table_id, &player_id).await;
    let decision = if let Some(agent_id) = agent_id {
        match registry.request_decision(&agent_id, table_id, hand_number, view.clone()).await {
            Ok(decision) => decision,
            Err(_) => arena_agents::default_timeout_decision(&view),
        }
    } else if let Some(archetype) = bots.get(&(table_id.to_string(), player_id.clone())) {
        bot_decide(*archetype, &view)
    } else {
        arena_agents::default_timeout_decision(&view)
    };

    let mut t = table.lock().await;
    if snapshot_turn(&t, seat_index).map(|(pid, ..)| pid) != Some(player_id.clone()) {
        return; // no longer this seat's turn (timed out from under us)
    }
    let _ = t.process_action(&player_id, decision.action, decision.amount);
}

fn snapshot_turn(table: &Table, seat_index: usize) -> Option<(String, u64, arena_gameplay::PlayerView)> {
    let state = table.snapshot();
    if state.active_player_index != Some(seat_index) {
        return None;
    }
    let player_id = state.seats[seat_index].player_id.clone()?;
    let view = table.player_view(&player_id).ok()?;
    Some((player_id, state.hand_number, view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_agents::RegistryConfig;
    use std::sync::Mutex as StdMutex;

    fn fast_config() -> ArenaConfig {
        ArenaConfig {
            bot_count: 4,
            max_hands: 2,
            hand_delay_ms: 1,
            action_delay_ms: 1,
            phase_delay_ms: 1,
            small_blind: 5,
            big_blind: 10,
            starting_stack: 1000,
            action_timeout_ms: 2_000,
            table_count: 1,
        }
    }

    #[derive(Default)]
    struct RecordingLeaderboard {
        calls: StdMutex<Vec<String>>,
    }

    impl LeaderboardSink for RecordingLeaderboard {
        fn record_result(&self, player_id: &str, _name: &str, _kind: &str, _style: &str, _won: bool, _amount: i64) {
            self.calls.lock().unwrap().push(player_id.to_string());
        }
    }

    #[tokio::test]
    async fn bot_only_arena_plays_hands_to_completion() {
        let registry = Arc::new(AgentRegistry::new(RegistryConfig::default()));
        let leaderboard = Arc::new(RecordingLeaderboard::default());
        let mut arena = Arena::new(fast_config(), registry)
            .unwrap()
            .with_leaderboard(leaderboard.clone());
        arena.start().await.unwrap();

        for _ in 0..200 {
            if arena.get_status().await.total_hands_played >= 2 {
                break;
            }
            sleep(Duration::from_millis(20)).await;
        }

        let status = arena.get_status().await;
        assert_eq!(status.total_hands_played, 2);
        assert!(!leaderboard.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn starting_twice_is_rejected() {
        let registry = Arc::new(AgentRegistry::new(RegistryConfig::default()));
        let mut arena = Arena::new(fast_config(), registry).unwrap();
        arena.start().await.unwrap();
        assert!(arena.start().await.is_err());
    }
}
