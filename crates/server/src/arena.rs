use actix_web::web;
use actix_web::HttpResponse;
use actix_web::Responder;
use arena_orchestrator::ArenaConfig;
use arena_orchestrator::LeaderboardSortBy;
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct StartRequest {
    #[serde(default)]
    pub config: Option<ArenaConfig>,
}

/// `start(config?)` per §6; rejected when an Arena is already running.
pub async fn start(state: web::Data<AppState>, body: Option<web::Json<StartRequest>>) -> impl Responder {
    let config = body.and_then(|b| b.into_inner().config).unwrap_or_default();
    match state.rebuild_and_start(config).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "started" })),
        Err(e) => HttpResponse::Conflict().body(e.to_string()),
    }
}

pub async fn stop(state: web::Data<AppState>) -> impl Responder {
    let slot = state.arena.lock().await;
    match slot.as_ref() {
        Some(arena) => {
            arena.stop();
            HttpResponse::Ok().json(serde_json::json!({ "status": "stopped" }))
        }
        None => HttpResponse::Ok().json(serde_json::json!({ "status": "not_running" })),
    }
}

pub async fn get_status(state: web::Data<AppState>) -> impl Responder {
    let slot = state.arena.lock().await;
    match slot.as_ref() {
        Some(arena) => HttpResponse::Ok().json(arena.get_status().await),
        None => HttpResponse::Ok().json(serde_json::json!({
            "running": false,
            "tables": [],
            "totalHandsPlayed": 0,
        })),
    }
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default, rename = "sortBy")]
    pub sort_by: Option<String>,
}

pub async fn get_leaderboard(state: web::Data<AppState>, query: web::Query<LeaderboardQuery>) -> impl Responder {
    let sort_by = match query.sort_by.as_deref() {
        Some("profit") => LeaderboardSortBy::Profit,
        Some("hands") => LeaderboardSortBy::Hands,
        _ => LeaderboardSortBy::WinRate,
    };
    let slot = state.arena.lock().await;
    match slot.as_ref() {
        Some(arena) => HttpResponse::Ok().json(arena.get_leaderboard(sort_by).await),
        None => HttpResponse::Ok().json(Vec::<arena_orchestrator::LeaderboardEntry>::new()),
    }
}
