use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Build the application for `cfg` without binding anything.
pub fn build_app(cfg: &AppConfig) -> Router {
    let state = AppState::from_config(cfg);
    routes::build_router(state, build_cors(), &cfg.server.frontend_dir)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_env(&cfg.server.frontend_dir).await?;

    info!(
        backend = ?cfg.store.backend,
        spreadsheet_id = %cfg.sheets.spreadsheet_id,
        credentials = cfg.sheets.client_email.is_some() && cfg.sheets.private_key.is_some(),
        "sheet store configured"
    );
    let app = build_app(&cfg);

    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "starting property api");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
