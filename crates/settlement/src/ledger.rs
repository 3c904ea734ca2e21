use async_trait::async_trait;

use crate::submission::SettlementSubmission;

/// The external ledger collaborator; out of scope per §1 ("chain RPC
/// client details"). `arena-server` or a test double supplies the real
/// implementation.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn submit(&self, submission: &SettlementSubmission) -> Result<(), String>;
}

/// Always-succeeds stub for tests and standalone runs.
pub struct NoopLedger;

#[async_trait]
impl LedgerClient for NoopLedger {
    async fn submit(&self, _submission: &SettlementSubmission) -> Result<(), String> {
        Ok(())
    }
}
