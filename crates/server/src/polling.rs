use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use actix_web::web;
use actix_web::HttpResponse;
use actix_web::Responder;
use arena_gameplay::Action;
use arena_gameplay::Decision;
use serde::Deserialize;

use crate::state::AppState;

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Polling read endpoint per §6: `{hasTurn:true, playerView, timeoutMs,
/// turnStartedAtMs, remainingMs}` when a turn is armed, else
/// `{hasTurn:false, status, playerId, tableId}`.
pub async fn read_turn(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let agent_id = path.into_inner();
    if let Some((view, timeout_ms, remaining_ms)) = state.registry.read_pending_turn(&agent_id).await {
        let elapsed = timeout_ms.saturating_sub(remaining_ms);
        return HttpResponse::Ok().json(serde_json::json!({
            "hasTurn": true,
            "playerView": view,
            "timeoutMs": timeout_ms,
            "turnStartedAtMs": now_ms().saturating_sub(elapsed),
            "remainingMs": remaining_ms,
        }));
    }

    let seat = state.registry.current_seat(&agent_id).await;
    HttpResponse::Ok().json(serde_json::json!({
        "hasTurn": false,
        "status": "idle",
        "playerId": seat.as_ref().map(|(_, player_id)| player_id.clone()),
        "tableId": seat.as_ref().map(|(table_id, _)| table_id.clone()),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SubmitActionRequest {
    pub action: String,
    pub amount: i64,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Polling submit endpoint per §6. The raw action/amount are passed
/// through as-is; `AgentRegistry::request_decision` applies the
/// fallback cascade and amount clamp once the pending turn resolves.
pub async fn submit_action(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SubmitActionRequest>,
) -> impl Responder {
    let agent_id = path.into_inner();
    let Some(action) = Action::parse(&body.action) else {
        return HttpResponse::BadRequest().body(format!("unknown action '{}'", body.action));
    };
    let decision = Decision {
        action,
        amount: body.amount,
        reasoning: body.reasoning.clone(),
    };
    let accepted = state.registry.submit_pending_turn(&agent_id, decision).await;
    if accepted {
        HttpResponse::Ok().json(serde_json::json!({ "accepted": true }))
    } else {
        HttpResponse::Ok().json(serde_json::json!({
            "accepted": false,
            "reason": "turn timed out or already submitted",
        }))
    }
}
