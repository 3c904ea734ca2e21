mod agent;
mod fallback;
mod latency;
mod pending;
mod registry;

pub use agent::Agent;
pub use fallback::default_timeout_decision;
pub use fallback::fallback_cascade;
pub use fallback::validate_decision;
pub use latency::LatencyTracker;
pub use pending::PendingTurn;
pub use registry::AgentRegistry;
pub use registry::AgentSummary;
pub use registry::RegisterMode;
pub use registry::RegistryConfig;
