use arena_gameplay::Decision;
use arena_gameplay::PlayerView;
use async_trait::async_trait;

/// The one abstract capability every transport mode implements, per the
/// "unified agent transport" design note (§9): in-process agents are
/// plain implementors; push/pull agents are adapted onto this same
/// contract by the registry so the Table loop never special-cases a
/// transport.
#[async_trait]
pub trait Agent: Send {
    async fn decide(&mut self, view: &PlayerView) -> Decision;
}
