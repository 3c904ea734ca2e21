mod agents;
mod arena;
mod polling;
mod state;

pub use state::AppState;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use arena_agents::AgentRegistry;
use arena_agents::RegistryConfig;
use arena_dashboard::DashboardBus;
use arena_settlement::BatchSettler;
use arena_settlement::NoWallets;
use arena_settlement::NoopLedger;
use arena_settlement::SettlementConfig;

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

/// Composes the agent registry, dashboard bus and batch settler and
/// serves the HTTP surface named in §6. The chain RPC client and
/// wallet registry are out of scope (§1); `NoopLedger`/`NoWallets`
/// stand in until `arena-server`'s caller wires real ones.
#[rustfmt::skip]
pub async fn run() -> std::io::Result<()> {
    arena_core::init_logging("arena-server.log");

    let registry = Arc::new(AgentRegistry::new(RegistryConfig::default()));
    let dashboard = Arc::new(DashboardBus::new());
    let settlement = Arc::new(
        BatchSettler::new(SettlementConfig::default(), Arc::new(NoopLedger), Arc::new(NoWallets))
            .with_error_sink(dashboard.clone()),
    );
    let state = web::Data::new(AppState::new(registry, dashboard, settlement));

    log::info!("starting arena server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(Cors::default().allow_any_origin().allow_any_method().allow_any_header())
            .app_data(state.clone())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/agents")
                    .route("/register", web::post().to(agents::register_agent))
                    .route("", web::get().to(agents::list_agents))
                    .route("/{id}", web::get().to(agents::get_agent))
                    .route("/{id}/unregister", web::post().to(agents::unregister_agent))
                    .route("/{id}/turn", web::get().to(polling::read_turn))
                    .route("/{id}/action", web::post().to(polling::submit_action))
                    .route("/by-seat/{table_id}/{player_id}", web::get().to(agents::get_agent_by_player_id)),
            )
            .service(
                web::scope("/arena")
                    .route("/start", web::post().to(arena::start))
                    .route("/stop", web::post().to(arena::stop))
                    .route("/status", web::get().to(arena::get_status))
                    .route("/leaderboard", web::get().to(arena::get_leaderboard)),
            )
    })
    .bind(std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()))?
    .run()
    .await
}
