use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, LogFormat};
use service::catalog::{seed, ProductService};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, RouterOptions, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let addr = cfg.bind_addr();
    addr.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {addr}: {e}")))
}

/// Seed the catalog per config and wire it into the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let store = seed::build_store(cfg.catalog.seed_path.as_deref(), cfg.catalog.id_strategy).await?;
    let state = ServerState { products: ProductService::new(store) };
    Ok(routes::build_router(state, build_cors(), &RouterOptions::from_config(cfg)))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: load config, build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_or_env()?;
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    common::utils::logging::init_logging(cfg.logging.format == LogFormat::Json);

    common::env::ensure_env(&cfg.assets.images_dir).await?;

    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "starting server");
    if let Some(docs) = cfg.docs.enabled.then_some(&cfg.docs.path) {
        info!(url = %format!("http://{addr}{docs}"), "api docs");
    }
    info!(url = %format!("http://{addr}{}", cfg.assets.images_route), "static images");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
