use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use ragserve::config::AppConfig;
use ragserve::state::AppState;
use ragserve::{logging, seed, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    logging::init(config.log_dir.as_deref());

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let state = AppState::initialize(config);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    // Seed in the background so an unreachable store never delays startup.
    tokio::spawn(seed::run(state.clone()));

    let app: Router = server::router::router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
