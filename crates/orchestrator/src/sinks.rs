use arena_gameplay::HandResult;
use async_trait::async_trait;

/// Narrow interface the Arena pushes completed hands through, per the
/// data-flow line in §2 (`Table/Arena -> BatchSettler`). Implemented by
/// `arena-settlement`'s `BatchSettler`; kept as a trait here so the
/// orchestrator never depends on settlement's own dependency stack.
#[async_trait]
pub trait SettlementSink: Send + Sync {
    async fn push_hand_result(&self, room_id: &str, result: HandResult);
}

/// Narrow interface for the dashboard event bus (§4.10); implemented by
/// `arena-dashboard`.
pub trait DashboardSink: Send + Sync {
    fn publish_hand_result(&self, table_id: &str, result: &HandResult);
    fn publish_player_turn(&self, table_id: &str, seat_index: usize);
}

/// Narrow interface a settlement flush reports through once its retries
/// are exhausted (§4.9: "emit a settlement-error event"). Kept separate
/// from `SettlementSink` since the error path has no hand result to
/// carry, and a caller may want to observe failures without receiving
/// every successful flush.
pub trait SettlementErrorSink: Send + Sync {
    fn publish_settlement_error(&self, room_id: &str, reason: &str);
}
