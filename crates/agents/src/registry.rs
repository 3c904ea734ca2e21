use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use arena_core::ArenaError;
use arena_core::ArenaResult;
use arena_core::Millis;
use arena_core::DEFAULT_ACTION_TIMEOUT_MS;
use arena_core::DEFAULT_CALLBACK_RETRIES;
use arena_core::DEFAULT_CALLBACK_TIMEOUT_MS;
use arena_core::CALLBACK_BACKOFF_MS;
use arena_gameplay::Action;
use arena_gameplay::Decision;
use arena_gameplay::PlayerView;
use futures::FutureExt;
use serde::Deserialize;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Duration;

use crate::agent::Agent;
use crate::fallback::default_timeout_decision;
use crate::fallback::validate_decision;
use crate::latency::LatencyTracker;
use crate::pending::PendingTurn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterMode {
    Callback,
    Polling,
}

enum Transport {
    InProcess(Box<dyn Agent>),
    Callback { url: String },
    Polling,
}

struct AgentRecord {
    name: String,
    transport: Transport,
    wallet_address: Option<String>,
    metadata: Option<serde_json::Value>,
    latency: LatencyTracker,
    pending: Option<Arc<PendingTurn>>,
}

#[derive(Debug, Clone)]
pub struct AgentSummary {
    pub id: String,
    pub name: String,
    pub wallet_address: Option<String>,
    pub mean_latency_ms: f64,
}

#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub max_agents: usize,
    pub action_timeout_ms: Millis,
    pub callback_timeout_ms: Millis,
    pub callback_retries: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_agents: 64,
            action_timeout_ms: DEFAULT_ACTION_TIMEOUT_MS,
            callback_timeout_ms: DEFAULT_CALLBACK_TIMEOUT_MS,
            callback_retries: DEFAULT_CALLBACK_RETRIES,
        }
    }
}

#[derive(Debug, Serialize)]
struct ActionRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    agent_id: &'a str,
    table_id: &'a str,
    hand_number: u64,
    player_view: &'a PlayerView,
    timeout_ms: Millis,
}

#[derive(Debug, Deserialize)]
struct ActionResponse {
    action: String,
    amount: i64,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Unifies the three agent transport modes behind one contract, per
/// §4.7. The map is guarded by a `tokio::sync::Mutex` so
/// `request_decision` can release it across the `.await` boundaries
/// push/pull dispatch suspends on.
pub struct AgentRegistry {
    agents: Mutex<HashMap<String, AgentRecord>>,
    seat_map: Mutex<HashMap<(String, String), String>>,
    agent_seat: Mutex<HashMap<String, (String, String)>>,
    config: RegistryConfig,
    http: reqwest::Client,
}

impl AgentRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            agents: Mutex::new(HashMap::new()),
            seat_map: Mutex::new(HashMap::new()),
            agent_seat: Mutex::new(HashMap::new()),
            config,
            http: reqwest::Client::new(),
        }
    }

    pub async fn register_agent(
        &self,
        name: &str,
        mode: RegisterMode,
        callback_url: Option<String>,
        wallet_address: Option<String>,
        metadata: Option<serde_json::Value>,
    ) -> ArenaResult<String> {
        let mut agents = self.agents.lock().await;
        if agents.len() >= self.config.max_agents {
            return Err(ArenaError::validation("maxAgents exceeded"));
        }
        let transport = match mode {
            RegisterMode::Callback => Transport::Callback {
                url: callback_url
                    .ok_or_else(|| ArenaError::validation("callback mode requires callbackUrl"))?,
            },
            RegisterMode::Polling => Transport::Polling,
        };
        let id = format!("agent-{}", uuid_like(agents.len()));
        agents.insert(
            id.clone(),
            AgentRecord {
                name: name.to_string(),
                transport,
                wallet_address,
                metadata,
                latency: LatencyTracker::default(),
                pending: None,
            },
        );
        Ok(id)
    }

    pub async fn register_internal_agent(
        &self,
        id: &str,
        name: &str,
        decide: Box<dyn Agent>,
        wallet_address: Option<String>,
    ) -> ArenaResult<()> {
        let mut agents = self.agents.lock().await;
        if agents.contains_key(id) {
            return Err(ArenaError::validation("duplicate agent id"));
        }
        agents.insert(
            id.to_string(),
            AgentRecord {
                name: name.to_string(),
                transport: Transport::InProcess(decide),
                wallet_address,
                metadata: None,
                latency: LatencyTracker::default(),
                pending: None,
            },
        );
        Ok(())
    }

    /// Idempotent; cancels any pending turn, resolving it with the
    /// default action.
    pub async fn unregister_agent(&self, id: &str) {
        let mut agents = self.agents.lock().await;
        if let Some(record) = agents.remove(id) {
            if let Some(pending) = record.pending {
                pending.resolve(default_timeout_decision(&pending.view));
            }
        }
        self.agent_seat.lock().await.remove(id);
    }

    pub async fn list_agents(&self) -> Vec<AgentSummary> {
        let agents = self.agents.lock().await;
        agents
            .iter()
            .map(|(id, record)| AgentSummary {
                id: id.clone(),
                name: record.name.clone(),
                wallet_address: record.wallet_address.clone(),
                mean_latency_ms: record.latency.mean(),
            })
            .collect()
    }

    pub async fn get_agent(&self, id: &str) -> Option<AgentSummary> {
        let agents = self.agents.lock().await;
        agents.get(id).map(|record| AgentSummary {
            id: id.to_string(),
            name: record.name.clone(),
            wallet_address: record.wallet_address.clone(),
            mean_latency_ms: record.latency.mean(),
        })
    }

    pub async fn bind_seat(&self, table_id: &str, player_id: &str, agent_id: &str) {
        self.seat_map
            .lock()
            .await
            .insert((table_id.to_string(), player_id.to_string()), agent_id.to_string());
        self.agent_seat
            .lock()
            .await
            .insert(agent_id.to_string(), (table_id.to_string(), player_id.to_string()));
    }

    pub async fn get_agent_by_player_id(&self, table_id: &str, player_id: &str) -> Option<String> {
        self.seat_map
            .lock()
            .await
            .get(&(table_id.to_string(), player_id.to_string()))
            .cloned()
    }

    /// Reverse lookup used by the polling read endpoint to report
    /// `{playerId, tableId}` even when no turn is currently pending.
    pub async fn current_seat(&self, agent_id: &str) -> Option<(String, String)> {
        self.agent_seat.lock().await.get(agent_id).cloned()
    }

    /// Requests a decision uniformly across all three transport modes,
    /// returning a validated, amount-clamped `Decision`.
    pub async fn request_decision(
        &self,
        agent_id: &str,
        table_id: &str,
        hand_number: u64,
        view: PlayerView,
    ) -> ArenaResult<Decision> {
        let start = tokio::time::Instant::now();
        let timeout = Duration::from_millis(self.config.action_timeout_ms);

        let raw = {
            let mut agents = self.agents.lock().await;
            let record = agents
                .get_mut(agent_id)
                .ok_or_else(|| ArenaError::validation("unknown agent id"))?;
            match &mut record.transport {
                Transport::InProcess(agent) => {
                    match AssertUnwindSafe(agent.decide(&view)).catch_unwind().await {
                        Ok(decision) => (decision.action, decision.amount),
                        Err(_) => {
                            log::error!(
                                "[agents] in-process agent {agent_id} panicked during decide; falling back to default action"
                            );
                            let fallback = default_timeout_decision(&view);
                            (fallback.action, fallback.amount)
                        }
                    }
                }
                Transport::Callback { url } => {
                    let url = url.clone();
                    drop(agents); // release the lock across the network round trip
                    self.dispatch_callback(agent_id, table_id, hand_number, &view, &url)
                        .await
                }
                Transport::Polling => {
                    let (pending, rx) = PendingTurn::new(view.clone(), timeout);
                    let pending = Arc::new(pending);
                    record.pending = Some(pending.clone());
                    drop(agents); // release the lock while awaiting the agent's submission
                    self.await_pending(pending, rx, timeout).await
                }
            }
        };

        let decision = validate_decision(Some(raw.0), raw.1, &view);

        let mut agents = self.agents.lock().await;
        if let Some(record) = agents.get_mut(agent_id) {
            record.latency.push(start.elapsed().as_millis() as u64);
            record.pending = None;
        }
        Ok(decision)
    }

    async fn dispatch_callback(
        &self,
        agent_id: &str,
        table_id: &str,
        hand_number: u64,
        view: &PlayerView,
        url: &str,
    ) -> (Action, i64) {
        let body = ActionRequest {
            kind: "action_request",
            agent_id,
            table_id,
            hand_number,
            player_view: view,
            timeout_ms: self.config.callback_timeout_ms,
        };
        let attempts = 1 + self.config.callback_retries;
        for attempt in 0..attempts {
            if attempt > 0 {
                tokio::time::sleep(Duration::from_millis(CALLBACK_BACKOFF_MS)).await;
            }
            let response = self
                .http
                .post(url)
                .json(&body)
                .timeout(StdDuration::from_millis(self.config.callback_timeout_ms))
                .send()
                .await;
            match response {
                Ok(resp) if resp.status().is_success() => {
                    if let Ok(parsed) = resp.json::<ActionResponse>().await {
                        if let Some(action) = Action::parse(&parsed.action) {
                            return (action, parsed.amount);
                        }
                    }
                    log::warn!("[agents] callback {agent_id} returned an unparseable body");
                }
                Ok(resp) => {
                    log::warn!(
                        "[agents] callback {agent_id} attempt {attempt} returned {}",
                        resp.status()
                    );
                }
                Err(err) => {
                    log::warn!("[agents] callback {agent_id} attempt {attempt} failed: {err}");
                }
            }
        }
        let fallback = default_timeout_decision(view);
        (fallback.action, fallback.amount)
    }

    async fn await_pending(
        &self,
        pending: Arc<PendingTurn>,
        rx: tokio::sync::oneshot::Receiver<Decision>,
        timeout: Duration,
    ) -> (Action, i64) {
        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(decision)) => (decision.action, decision.amount),
            _ => {
                let fallback = default_timeout_decision(&pending.view);
                pending.resolve(fallback.clone());
                (fallback.action, fallback.amount)
            }
        }
    }

    /// Polling read endpoint: returns the pending turn's view and
    /// timing if one is armed for this agent.
    pub async fn read_pending_turn(&self, agent_id: &str) -> Option<(PlayerView, Millis, Millis)> {
        let agents = self.agents.lock().await;
        let record = agents.get(agent_id)?;
        let pending = record.pending.as_ref()?;
        let remaining = pending.remaining().as_millis() as Millis;
        let timeout_ms = self.config.action_timeout_ms;
        Some((pending.view.clone(), timeout_ms, remaining))
    }

    /// Polling submit endpoint. Returns `true` if this submission was
    /// accepted (first to resolve, before the deadline).
    pub async fn submit_pending_turn(&self, agent_id: &str, decision: Decision) -> bool {
        let agents = self.agents.lock().await;
        match agents.get(agent_id).and_then(|r| r.pending.as_ref()) {
            Some(pending) if !pending.expired() => pending.resolve(decision),
            _ => false,
        }
    }
}

fn uuid_like(seed: usize) -> String {
    format!("{seed:x}-{:x}", std::process::id())
}
