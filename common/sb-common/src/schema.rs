//! JSON bodies for the bridge's HTTP surface.

use serde::{Deserialize, Serialize};

/// Client identity reported to the Super Builder service when a chat
/// request does not carry one.
pub const DEFAULT_CLIENT_NAME: &str = "bridge";

/// Body for `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    /// Conversation to append to; the bridge assigns a fresh one when absent.
    #[serde(default)]
    pub session_id: Option<i64>,
    #[serde(default = "default_client_name")]
    pub name: String,
}

fn default_client_name() -> String {
    DEFAULT_CLIENT_NAME.to_string()
}

/// Response for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub superbuilder_connected: bool,
    pub llm_ready: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response for `POST /reconnect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconnectResponse {
    pub status: String,
    pub models_loaded: bool,
    pub message: String,
}

/// Response for `GET /` - service descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub status: String,
    /// Path of the health endpoint, for discoverability.
    pub health: String,
}

/// Error body for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_fills_defaults() {
        let req: ChatRequest = serde_json::from_str(r#"{"prompt":"hi"}"#).unwrap();
        assert_eq!(req.prompt, "hi");
        assert_eq!(req.session_id, None);
        assert_eq!(req.name, DEFAULT_CLIENT_NAME);
    }

    #[test]
    fn chat_request_keeps_explicit_fields() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"prompt":"hi","session_id":42,"name":"tui"}"#).unwrap();
        assert_eq!(req.session_id, Some(42));
        assert_eq!(req.name, "tui");
    }

    #[test]
    fn health_response_field_names() {
        let health = HealthResponse {
            status: "healthy".into(),
            superbuilder_connected: true,
            llm_ready: true,
            message: Some("All systems operational".into()),
        };
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["superbuilder_connected"], true);
        assert_eq!(json["llm_ready"], true);
    }

    #[test]
    fn health_response_message_is_optional() {
        let health: HealthResponse = serde_json::from_str(
            r#"{"status":"degraded","superbuilder_connected":false,"llm_ready":false}"#,
        )
        .unwrap();
        assert_eq!(health.message, None);
    }

    #[test]
    fn error_response_shape() {
        let err = ErrorResponse::new("boom");
        assert_eq!(serde_json::to_string(&err).unwrap(), r#"{"error":"boom"}"#);
    }
}
