//! Web server module for the chat bridge
//!
//! Exposes the HTTP surface presentation clients talk to and relays chat
//! traffic to the Super Builder gRPC service.

pub mod api;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ConnectorConfig;
use crate::connector::BackendConnector;
use state::AppState;

/// Configuration for the web server
pub struct WebConfig {
    pub bind: String,
    pub port: u16,
    pub connector: ConnectorConfig,
}

/// Start the web server
pub async fn serve(config: WebConfig) -> Result<()> {
    let connector = Arc::new(BackendConnector::new(config.connector));

    // Eager connect; failure starts the service degraded rather than aborting.
    match connector.connect().await {
        Ok(()) => {
            if let Err(e) = connector.load_models().await {
                tracing::warn!("startup model load failed: {e}");
            }
        }
        Err(e) => {
            tracing::warn!("startup connection failed: {e}");
        }
    }

    let state = AppState::new(Arc::clone(&connector));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port).parse()?;
    tracing::info!("Starting chat bridge on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    connector.disconnect().await;
    tracing::info!("Chat bridge stopped");

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::service_info))
        .route("/health", get(api::health_check))
        .route("/chat", post(api::chat))
        .route("/reconnect", post(api::reconnect))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
