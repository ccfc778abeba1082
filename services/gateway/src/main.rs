use axum::{
    routing::{get, post, put},
    Router,
};
use devledger_consensus::ConsensusMonitor;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::info;

mod config;
mod handlers;
mod state;

use config::GatewayConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    devledger_core::logging::init();

    let config = GatewayConfig::from_env();
    let state = Arc::new(AppState::new(&config)?);

    let monitor_handle = ConsensusMonitor::spawn(state.monitor.clone());

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/device", post(handlers::register_device))
        .route(
            "/api/device/:id",
            get(handlers::get_device).delete(handlers::retire_device),
        )
        .route("/api/device/:id/reputation", put(handlers::update_reputation))
        .route("/api/device/:id/history", get(handlers::device_history))
        .route("/api/consensus/status", get(handlers::consensus_status))
        .with_state(state)
        .layer(ServiceBuilder::new().into_inner());

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("devledger gateway listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The polling loop stops after the listener drains; in-flight requests
    // are unaffected.
    monitor_handle.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
