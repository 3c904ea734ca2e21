use std::sync::Arc;

use arena_agents::AgentRegistry;
use arena_dashboard::DashboardBus;
use arena_orchestrator::Arena;
use arena_orchestrator::ArenaConfig;
use arena_settlement::BatchSettler;
use tokio::sync::Mutex;

/// Everything the HTTP handlers share, composed once at process start.
/// Holding the live `Arena` behind a `Mutex<Option<_>>` lets `start`
/// rebuild it with fresh config while `stop`/`getStatus` act on
/// whichever instance is current.
pub struct AppState {
    pub registry: Arc<AgentRegistry>,
    pub dashboard: Arc<DashboardBus>,
    pub settlement: Arc<BatchSettler>,
    pub arena: Mutex<Option<Arena>>,
}

impl AppState {
    pub fn new(registry: Arc<AgentRegistry>, dashboard: Arc<DashboardBus>, settlement: Arc<BatchSettler>) -> Self {
        Self {
            registry,
            dashboard,
            settlement,
            arena: Mutex::new(None),
        }
    }

    /// Builds a fresh `Arena` from `config`, wired to the shared
    /// registry/dashboard/settlement sinks, replacing any previously
    /// stopped instance. Rejects if the current instance is running.
    pub async fn rebuild_and_start(&self, config: ArenaConfig) -> anyhow::Result<()> {
        let mut slot = self.arena.lock().await;
        if let Some(existing) = slot.as_ref() {
            if existing.is_running() {
                anyhow::bail!("arena already running");
            }
        }
        let mut arena = Arena::new(config, self.registry.clone())?
            .with_settlement(self.settlement.clone())
            .with_dashboard(self.dashboard.clone());
        arena.start().await?;
        *slot = Some(arena);
        Ok(())
    }
}
