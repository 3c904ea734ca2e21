use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use arena_core::ArenaError;
use arena_core::Millis;
use arena_core::DEFAULT_BATCH_SIZE;
use arena_core::DEFAULT_FLUSH_INTERVAL_MS;
use arena_core::DEFAULT_RETRY_COUNT;
use arena_core::DEFAULT_RETRY_DELAY_MS;
use arena_gameplay::HandResult;
use arena_orchestrator::SettlementErrorSink;
use arena_orchestrator::SettlementSink;
use async_trait::async_trait;
use sha3::Digest;
use sha3::Keccak256;
use tokio::sync::Mutex;
use tokio::sync::Notify;
use tokio::time::sleep;
use tokio::time::Duration;

use crate::ledger::LedgerClient;
use crate::merkle::leaf_hash;
use crate::merkle::merkle_root;
use crate::submission::SettlementSubmission;
use crate::wallet::WalletResolver;

#[derive(Debug, Clone)]
pub struct SettlementConfig {
    pub batch_size: usize,
    pub flush_interval_ms: Millis,
    pub retry_count: u32,
    pub retry_delay_ms: Millis,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            flush_interval_ms: DEFAULT_FLUSH_INTERVAL_MS,
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

struct RoomState {
    hands: Vec<HandResult>,
    notify: Arc<Notify>,
    watcher_spawned: bool,
}

struct Inner {
    config: SettlementConfig,
    ledger: Arc<dyn LedgerClient>,
    wallets: Arc<dyn WalletResolver>,
    rooms: Mutex<HashMap<String, RoomState>>,
    error_sink: std::sync::Mutex<Option<Arc<dyn SettlementErrorSink>>>,
}

/// The batch settler (C11) + action-log store (C12): accumulates hand
/// results per room and flushes on size or inactivity, per §4.9.
/// Cheaply `Clone` (an `Arc` handle) so the spawned per-room flush
/// watchers can share it.
#[derive(Clone)]
pub struct BatchSettler {
    inner: Arc<Inner>,
}

impl BatchSettler {
    pub fn new(config: SettlementConfig, ledger: Arc<dyn LedgerClient>, wallets: Arc<dyn WalletResolver>) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                ledger,
                wallets,
                rooms: Mutex::new(HashMap::new()),
                error_sink: std::sync::Mutex::new(None),
            }),
        }
    }

    /// Attaches a collaborator notified when a flush exhausts its
    /// retries, per §4.9's "emit a settlement-error event".
    pub fn with_error_sink(self, sink: Arc<dyn SettlementErrorSink>) -> Self {
        *self.inner.error_sink.lock().unwrap() = Some(sink);
        self
    }

    /// Flushes any residual hands for `room_id` and evicts it.
    pub async fn finalize_room(&self, room_id: &str) {
        self.flush_room(room_id).await;
        self.inner.rooms.lock().await.remove(room_id);
    }

    async fn flush_room(&self, room_id: &str) {
        let hands = {
            let mut rooms = self.inner.rooms.lock().await;
            match rooms.get_mut(room_id) {
                Some(room) => std::mem::take(&mut room.hands),
                None => return,
            }
        };
        if hands.is_empty() {
            return;
        }

        let submission = self.build_submission(room_id, &hands);
        for attempt in 1..=self.inner.config.retry_count.max(1) {
            match self.inner.ledger.submit(&submission).await {
                Ok(()) => return,
                Err(reason) => {
                    if attempt == self.inner.config.retry_count.max(1) {
                        let err = ArenaError::SettlementError {
                            room: room_id.to_string(),
                            reason: reason.clone(),
                        };
                        log::error!(
                            "[settlement] room {room_id} lost {} hand(s) after {attempt} attempt(s): {err}",
                            hands.len()
                        );
                        if let Some(sink) = self.inner.error_sink.lock().unwrap().as_ref() {
                            sink.publish_settlement_error(room_id, &reason);
                        }
                        return;
                    }
                    sleep(Duration::from_millis(self.inner.config.retry_delay_ms * attempt as u64)).await;
                }
            }
        }
    }

    fn build_submission(&self, room_id: &str, hands: &[HandResult]) -> SettlementSubmission {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut session_input = room_id.as_bytes().to_vec();
        session_input.extend_from_slice(&now_ms.to_be_bytes());
        let mut hasher = Keccak256::new();
        hasher.update(&session_input);
        let session_id: [u8; 32] = hasher.finalize().into();

        let hand_numbers = hands.iter().map(|h| h.hand_number).collect();
        let winners_per_hand = hands
            .iter()
            .map(|h| h.winners.iter().map(|w| w.player_id.clone()).collect())
            .collect();
        let amounts_per_hand = hands
            .iter()
            .map(|h| h.winners.iter().map(|w| w.amount).collect())
            .collect();
        let action_log_hashes: Vec<[u8; 32]> = hands.iter().map(|h| leaf_hash(&h.action_log)).collect();
        let merkle_root = merkle_root(&action_log_hashes);

        let mut deltas: HashMap<String, i64> = HashMap::new();
        for hand in hands {
            for winner in &hand.winners {
                if let Some(address) = self.inner.wallets.resolve(&winner.player_id) {
                    *deltas.entry(address).or_insert(0) += winner.amount;
                }
            }
        }
        let players: Vec<String> = deltas.keys().cloned().collect();
        let chip_deltas: Vec<i64> = players.iter().map(|p| deltas[p]).collect();

        SettlementSubmission {
            session_id,
            hand_numbers,
            winners_per_hand,
            amounts_per_hand,
            action_log_hashes,
            players,
            chip_deltas,
            merkle_root,
        }
    }

    fn spawn_watcher(&self, room_id: String) {
        let settler = self.clone();
        tokio::spawn(async move {
            loop {
                let notify = {
                    let rooms = settler.inner.rooms.lock().await;
                    match rooms.get(&room_id) {
                        Some(room) => room.notify.clone(),
                        None => return,
                    }
                };
                tokio::select! {
                    _ = notify.notified() => {}
                    _ = sleep(Duration::from_millis(settler.inner.config.flush_interval_ms)) => {
                        settler.flush_room(&room_id).await;
                    }
                }
                if !settler.inner.rooms.lock().await.contains_key(&room_id) {
                    return;
                }
            }
        });
    }
}

#[async_trait]
impl SettlementSink for BatchSettler {
    async fn push_hand_result(&self, room_id: &str, result: HandResult) {
        let (ready_to_flush, needs_watcher) = {
            let mut rooms = self.inner.rooms.lock().await;
            let room = rooms.entry(room_id.to_string()).or_insert_with(|| RoomState {
                hands: Vec::new(),
                notify: Arc::new(Notify::new()),
                watcher_spawned: false,
            });
            room.hands.push(result);
            room.notify.notify_one();
            let ready = room.hands.len() >= self.inner.config.batch_size;
            let needs_watcher = !room.watcher_spawned;
            room.watcher_spawned = true;
            (ready, needs_watcher)
        };

        if needs_watcher {
            self.spawn_watcher(room_id.to_string());
        }
        if ready_to_flush {
            self.flush_room(room_id).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_gameplay::WinnerShare;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    struct CountingLedger {
        submissions: AtomicUsize,
        hands_seen: std::sync::Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl LedgerClient for CountingLedger {
        async fn submit(&self, submission: &SettlementSubmission) -> Result<(), String> {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            self.hands_seen.lock().unwrap().extend(&submission.hand_numbers);
            Ok(())
        }
    }

    struct AlwaysFailLedger;

    #[async_trait]
    impl LedgerClient for AlwaysFailLedger {
        async fn submit(&self, _submission: &SettlementSubmission) -> Result<(), String> {
            Err("unreachable ledger".to_string())
        }
    }

    struct FixedWallet;
    impl WalletResolver for FixedWallet {
        fn resolve(&self, player_id: &str) -> Option<String> {
            if player_id == "p1" {
                Some("0xabc".to_string())
            } else {
                None
            }
        }
    }

    fn hand(n: u64, winner: &str, amount: i64) -> HandResult {
        HandResult {
            table_id: "room-1".into(),
            hand_number: n,
            winners: vec![WinnerShare {
                player_id: winner.into(),
                amount,
                description: "test".into(),
            }],
            action_log: vec![],
        }
    }

    #[tokio::test]
    async fn flushes_immediately_once_batch_size_is_reached() {
        let ledger = Arc::new(CountingLedger {
            submissions: AtomicUsize::new(0),
            hands_seen: std::sync::Mutex::new(Vec::new()),
        });
        let config = SettlementConfig {
            batch_size: 3,
            flush_interval_ms: 60_000,
            retry_count: 3,
            retry_delay_ms: 10,
        };
        let settler = BatchSettler::new(config, ledger.clone(), Arc::new(FixedWallet));

        settler.push_hand_result("room-1", hand(1, "p1", 10)).await;
        settler.push_hand_result("room-1", hand(2, "p1", 20)).await;
        assert_eq!(ledger.submissions.load(Ordering::SeqCst), 0);
        settler.push_hand_result("room-1", hand(3, "p1", 30)).await;

        assert_eq!(ledger.submissions.load(Ordering::SeqCst), 1);
        assert_eq!(ledger.hands_seen.lock().unwrap().as_slice(), &[1, 2, 3]);
    }

    #[tokio::test]
    async fn chip_deltas_aggregate_resolved_wallets_only() {
        let ledger = Arc::new(CountingLedger {
            submissions: AtomicUsize::new(0),
            hands_seen: std::sync::Mutex::new(Vec::new()),
        });
        let config = SettlementConfig {
            batch_size: 2,
            ..SettlementConfig::default()
        };
        let settler = BatchSettler::new(config, ledger, Arc::new(FixedWallet));
        settler.push_hand_result("room-2", hand(1, "p1", 10)).await;
        settler.push_hand_result("room-2", hand(2, "bot-0", 99)).await;
        settler.finalize_room("room-2").await;
    }

    #[tokio::test]
    async fn exhausted_retries_drop_the_batch_without_panicking() {
        let config = SettlementConfig {
            batch_size: 1,
            retry_count: 2,
            retry_delay_ms: 1,
            ..SettlementConfig::default()
        };
        let settler = BatchSettler::new(config, Arc::new(AlwaysFailLedger), Arc::new(FixedWallet));
        settler.push_hand_result("room-3", hand(1, "p1", 10)).await;
    }

    struct RecordingErrorSink {
        errors: std::sync::Mutex<Vec<(String, String)>>,
    }

    impl SettlementErrorSink for RecordingErrorSink {
        fn publish_settlement_error(&self, room_id: &str, reason: &str) {
            self.errors
                .lock()
                .unwrap()
                .push((room_id.to_string(), reason.to_string()));
        }
    }

    #[tokio::test]
    async fn exhausted_retries_publish_a_settlement_error_event() {
        let config = SettlementConfig {
            batch_size: 1,
            retry_count: 2,
            retry_delay_ms: 1,
            ..SettlementConfig::default()
        };
        let sink = Arc::new(RecordingErrorSink {
            errors: std::sync::Mutex::new(Vec::new()),
        });
        let settler = BatchSettler::new(config, Arc::new(AlwaysFailLedger), Arc::new(FixedWallet))
            .with_error_sink(sink.clone());
        settler.push_hand_result("room-4", hand(1, "p1", 10)).await;

        let errors = sink.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "room-4");
        assert_eq!(errors[0].1, "unreachable ledger");
    }

    #[tokio::test]
    async fn finalize_room_flushes_residual_hands_below_batch_size() {
        let ledger = Arc::new(CountingLedger {
            submissions: AtomicUsize::new(0),
            hands_seen: std::sync::Mutex::new(Vec::new()),
        });
        let config = SettlementConfig {
            batch_size: 100,
            flush_interval_ms: 60_000,
            ..SettlementConfig::default()
        };
        let settler = BatchSettler::new(config, ledger.clone(), Arc::new(FixedWallet));
        settler.push_hand_result("room-4", hand(1, "p1", 10)).await;
        settler.finalize_room("room-4").await;
        assert_eq!(ledger.submissions.load(Ordering::SeqCst), 1);
    }
}
