//! edge-demos - Main entry point
//!
//! Hosts one worker behind an HTTP server and provides its bindings:
//! - Key-value namespace and object bucket (in-process service actors)
//! - Container namespace (HTTP routing to the container application)

mod config;
mod handlers;
mod router;
mod runtime;

use anyhow::Result;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edge_demos_sdk::Env;

use crate::config::AppConfig;
use crate::runtime::Services;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub env: Env,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,edge_demos=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting edge-demos");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    // Start the services behind the bindings
    let services = Services::start(&config).await?;
    tracing::info!("Services started: {:?}", services);

    let state = Arc::new(AppState {
        config: config.clone(),
        env: services.env(),
    });

    let app = router::create_gateway_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Worker '{}' listening on {}", config.worker, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    services.shutdown().await;
    tracing::info!("edge-demos stopped");

    Ok(())
}

/// Resolves on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
