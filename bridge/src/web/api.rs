//! REST API handlers

use std::convert::Infallible;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures_util::Stream;
use sb_common::schema::{
    ChatRequest, ErrorResponse, HealthResponse, ReconnectResponse, ServiceInfo,
};

use super::state::AppState;
use crate::connector::ChatStream;

/// In-band marker appended when the stream breaks after the HTTP status is
/// already committed.
pub const STREAM_ERROR_MARKER: &str = "\n\n[ERROR]";

/// Service descriptor
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Super Builder Chat Bridge".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
        health: "/health".to_string(),
    })
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let health = state.connector.check_health().await;
    Json(HealthResponse {
        status: if health.llm_ready { "healthy" } else { "degraded" }.to_string(),
        superbuilder_connected: health.connected,
        llm_ready: health.llm_ready,
        message: Some(health.message),
    })
}

/// Streaming chat endpoint
///
/// Relays the prompt to the Super Builder service and streams the answer
/// back verbatim as `text/plain`, one fragment per frame.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let connector = &state.connector;

    if !connector.is_connected().await {
        if let Err(e) = connector.connect().await {
            tracing::error!("reconnect before chat failed: {e}");
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(format!(
                    "Cannot connect to Super Builder service at {}. Is it running?",
                    connector.addr()
                ))),
            ));
        }
    }

    let health = connector.check_health().await;
    if !health.llm_ready {
        tracing::warn!("models not ready, requesting a load before chat");
        if let Err(e) = connector.load_models().await {
            tracing::error!("model load before chat failed: {e}");
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(
                    "LLM models are not loaded. Wait for the Super Builder service \
                     to finish loading and try again.",
                )),
            ));
        }
    }

    let stream = connector
        .chat(&req.prompt, req.session_id, &req.name)
        .await
        .map_err(|e| {
            tracing::error!("chat stream failed to open: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(format!("Chat request failed: {e}"))),
            )
        })?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(relay(stream)),
    )
        .into_response())
}

/// Turns connector chunks into HTTP body frames.
///
/// Fragments pass through untouched and in order. A failure after the first
/// frame cannot change the status line anymore, so it is appended to the
/// body as an in-band marker instead.
fn relay(mut stream: ChatStream) -> impl Stream<Item = Result<Bytes, Infallible>> {
    async_stream::stream! {
        loop {
            match stream.next_chunk().await {
                Ok(Some(text)) => yield Ok(Bytes::from(text)),
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("chat stream broke mid-response: {e}");
                    yield Ok(Bytes::from(format!("{STREAM_ERROR_MARKER} {e}")));
                    break;
                }
            }
        }
    }
}

/// Tears down and re-establishes the service connection
pub async fn reconnect(
    State(state): State<AppState>,
) -> Result<Json<ReconnectResponse>, (StatusCode, Json<ErrorResponse>)> {
    let connector = &state.connector;

    if connector.is_connected().await {
        connector.disconnect().await;
    }

    if let Err(e) = connector.connect().await {
        tracing::error!("reconnect failed: {e}");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(format!(
                "Failed to reconnect to Super Builder service at {}",
                connector.addr()
            ))),
        ));
    }

    let (models_loaded, message) = match connector.load_models().await {
        Ok(()) => (true, "Reconnected and models loaded".to_string()),
        Err(e) => {
            tracing::warn!("model load after reconnect failed: {e}");
            (false, format!("Reconnected, but model load failed: {e}"))
        }
    };

    Ok(Json(ReconnectResponse {
        status: "connected".to_string(),
        models_loaded,
        message,
    }))
}
