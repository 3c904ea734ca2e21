use actix_web::web;
use actix_web::HttpResponse;
use actix_web::Responder;
use arena_agents::RegisterMode;
use serde::Deserialize;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAgentRequest {
    pub name: String,
    pub mode: String,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct AgentSummaryResponse {
    pub id: String,
    pub name: String,
    pub wallet_address: Option<String>,
    pub mean_latency_ms: f64,
}

impl From<arena_agents::AgentSummary> for AgentSummaryResponse {
    fn from(s: arena_agents::AgentSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            wallet_address: s.wallet_address,
            mean_latency_ms: s.mean_latency_ms,
        }
    }
}

/// `registerAgent` per §6. `callback`/`polling` select the transport;
/// `registerInternalAgent` has no HTTP surface since in-process agents
/// are constructed from Rust `Agent` implementors, not wire payloads.
pub async fn register_agent(state: web::Data<AppState>, body: web::Json<RegisterAgentRequest>) -> impl Responder {
    let mode = match body.mode.to_ascii_lowercase().as_str() {
        "callback" => RegisterMode::Callback,
        "polling" => RegisterMode::Polling,
        other => {
            return HttpResponse::BadRequest().body(format!("unknown registration mode '{other}'"));
        }
    };
    match state
        .registry
        .register_agent(
            &body.name,
            mode,
            body.callback_url.clone(),
            body.wallet_address.clone(),
            body.metadata.clone(),
        )
        .await
    {
        Ok(agent_id) => HttpResponse::Ok().json(serde_json::json!({ "agentId": agent_id })),
        Err(e) => HttpResponse::BadRequest().body(e.to_string()),
    }
}

pub async fn unregister_agent(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    state.registry.unregister_agent(&path.into_inner()).await;
    HttpResponse::Ok().json(serde_json::json!({ "status": "unregistered" }))
}

pub async fn list_agents(state: web::Data<AppState>) -> impl Responder {
    let agents: Vec<AgentSummaryResponse> = state
        .registry
        .list_agents()
        .await
        .into_iter()
        .map(AgentSummaryResponse::from)
        .collect();
    HttpResponse::Ok().json(agents)
}

pub async fn get_agent(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.registry.get_agent(&path.into_inner()).await {
        Some(summary) => HttpResponse::Ok().json(AgentSummaryResponse::from(summary)),
        None => HttpResponse::NotFound().body("unknown agent id"),
    }
}

pub async fn get_agent_by_player_id(state: web::Data<AppState>, path: web::Path<(String, String)>) -> impl Responder {
    let (table_id, player_id) = path.into_inner();
    match state.registry.get_agent_by_player_id(&table_id, &player_id).await {
        Some(agent_id) => HttpResponse::Ok().json(serde_json::json!({ "agentId": agent_id })),
        None => HttpResponse::NotFound().body("no agent bound to that seat"),
    }
}
