//! Client-side connection manager for the Super Builder service.
//!
//! Owns the gRPC channel lifecycle and wraps every remote operation the
//! bridge relies on. Calls run on cheap clones of the channel taken under a
//! read lock, so an in-flight chat stream never blocks (and is never torn
//! by) a concurrent connect or disconnect.

use rand::Rng;
use serde::Deserialize;
use tokio::sync::RwLock;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, info, warn};

use crate::config::ConnectorConfig;
use crate::pb::{
    super_builder_client::SuperBuilderClient, ChatChunk, ChatRequest, DisconnectClientRequest,
    GetChatHistoryRequest, LoadModelsRequest, RemoveSessionRequest, SayHelloRequest,
};

/// Payload of a model-backend hello once models are loaded and usable.
/// The comparison is exact; anything else (including an empty reply)
/// means not ready.
pub const MODEL_READY_SENTINEL: &str = "ready";

/// Session ids are decimal numbers of at most eight digits.
pub const SESSION_ID_SPACE: i64 = 100_000_000;

/// Failure of a connector operation.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("not connected to Super Builder at {0}")]
    NotConnected(String),

    #[error("failed to connect to Super Builder at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("Super Builder call failed: {0}")]
    Rpc(#[from] tonic::Status),

    #[error("Super Builder rejected the model load request")]
    ModelLoadRejected,

    #[error("session {0} was not removed")]
    SessionNotRemoved(i64),

    #[error("invalid chat history payload: {0}")]
    InvalidHistory(#[from] serde_json::Error),
}

/// Snapshot of service health as seen by the connector.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub connected: bool,
    /// The middleware answered its hello.
    pub middleware_ready: bool,
    /// The model backend reported the readiness sentinel.
    pub llm_ready: bool,
    pub message: String,
}

/// One entry of the remote chat history blob.
///
/// The blob carries more fields than we need; records without an id are
/// skipped by callers.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub sid: Option<i64>,
}

/// Managed connection to the Super Builder service.
pub struct BackendConnector {
    config: ConnectorConfig,
    addr: String,
    channel: RwLock<Option<Channel>>,
}

impl BackendConnector {
    pub fn new(config: ConnectorConfig) -> Self {
        let addr = config.endpoint();
        Self {
            config,
            addr,
            channel: RwLock::new(None),
        }
    }

    /// Endpoint URL this connector targets.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub async fn is_connected(&self) -> bool {
        self.channel.read().await.is_some()
    }

    /// Establishes the channel, replacing any existing one.
    pub async fn connect(&self) -> Result<(), ConnectorError> {
        let endpoint = Endpoint::from_shared(self.addr.clone())
            .map_err(|e| ConnectorError::Connect {
                addr: self.addr.clone(),
                source: e,
            })?
            .connect_timeout(self.config.connect_timeout);

        let channel = endpoint
            .connect()
            .await
            .map_err(|e| ConnectorError::Connect {
                addr: self.addr.clone(),
                source: e,
            })?;

        *self.channel.write().await = Some(channel);
        info!("connected to Super Builder at {}", self.addr);
        Ok(())
    }

    /// Drops the channel and tells the service we are going away.
    ///
    /// Idempotent: disconnecting while not connected is a no-op. The
    /// goodbye RPC is best-effort and only logs on failure.
    pub async fn disconnect(&self) {
        let channel = self.channel.write().await.take();
        let Some(channel) = channel else {
            debug!("disconnect with no active channel");
            return;
        };

        let mut client = SuperBuilderClient::new(channel);
        match client.disconnect_client(DisconnectClientRequest {}).await {
            Ok(resp) => {
                if !resp.into_inner().success {
                    warn!("Super Builder did not acknowledge the disconnect");
                }
            }
            Err(e) => warn!("disconnect notification failed: {e}"),
        }
        info!("disconnected from Super Builder");
    }

    /// Clones the current channel into a fresh client stub.
    async fn client(&self) -> Result<SuperBuilderClient, ConnectorError> {
        match self.channel.read().await.as_ref() {
            Some(channel) => Ok(SuperBuilderClient::new(channel.clone())),
            None => Err(ConnectorError::NotConnected(self.addr.clone())),
        }
    }

    /// Probes the middleware and the model backend.
    ///
    /// Never fails: a disconnected connector yields a synthetic result
    /// without issuing any RPC, and RPC errors degrade into the message.
    pub async fn check_health(&self) -> HealthStatus {
        let mut client = match self.client().await {
            Ok(client) => client,
            Err(_) => {
                return HealthStatus {
                    connected: false,
                    middleware_ready: false,
                    llm_ready: false,
                    message: "Not connected to Super Builder service".to_string(),
                };
            }
        };

        let hello = SayHelloRequest {
            name: self.config.client_name.clone(),
        };

        let middleware_ready = match client.say_hello(hello.clone()).await {
            Ok(resp) => !resp.into_inner().message.is_empty(),
            Err(e) => {
                warn!("middleware hello failed: {e}");
                return HealthStatus {
                    connected: true,
                    middleware_ready: false,
                    llm_ready: false,
                    message: format!("Health check error: {e}"),
                };
            }
        };

        let llm_ready = match client.say_hello_pyllm(hello).await {
            Ok(resp) => resp.into_inner().message == MODEL_READY_SENTINEL,
            Err(e) => {
                warn!("model hello failed: {e}");
                return HealthStatus {
                    connected: true,
                    middleware_ready,
                    llm_ready: false,
                    message: format!("Health check error: {e}"),
                };
            }
        };

        HealthStatus {
            connected: true,
            middleware_ready,
            llm_ready,
            message: if llm_ready {
                "All systems operational".to_string()
            } else {
                "Models not loaded".to_string()
            },
        }
    }

    /// Asks the service to load its models. Blocks until the remote answers.
    pub async fn load_models(&self) -> Result<(), ConnectorError> {
        let mut client = self.client().await?;
        info!("requesting model load");
        let resp = client.load_models(LoadModelsRequest {}).await?;
        if resp.into_inner().status {
            info!("models loaded");
            Ok(())
        } else {
            Err(ConnectorError::ModelLoadRejected)
        }
    }

    /// Fetches the remote session list.
    pub async fn get_chat_history(&self) -> Result<Vec<SessionRecord>, ConnectorError> {
        let mut client = self.client().await?;
        let blob = client
            .get_chat_history(GetChatHistoryRequest {})
            .await?
            .into_inner()
            .data;
        let sessions: Vec<SessionRecord> = serde_json::from_str(&blob)?;
        Ok(sessions)
    }

    /// Picks a session id that is not already present in the remote history.
    ///
    /// A failed history fetch degrades to an empty snapshot: chat must keep
    /// working when the advisory read is flaky, and a collision was already
    /// possible between snapshot and use.
    pub async fn generate_session_id(&self) -> Result<i64, ConnectorError> {
        let existing: Vec<i64> = match self.get_chat_history().await {
            Ok(sessions) => sessions.iter().filter_map(|s| s.sid).collect(),
            Err(e @ ConnectorError::NotConnected(_)) => return Err(e),
            Err(e) => {
                warn!("history fetch failed while picking a session id: {e}");
                Vec::new()
            }
        };
        Ok(pick_session_id(&existing, rand::thread_rng()))
    }

    /// Opens a streaming chat call.
    ///
    /// When `session_id` is absent a fresh id is picked first.
    pub async fn chat(
        &self,
        prompt: &str,
        session_id: Option<i64>,
        name: &str,
    ) -> Result<ChatStream, ConnectorError> {
        let mut client = self.client().await?;
        let session_id = match session_id {
            Some(id) => id,
            None => self.generate_session_id().await?,
        };
        debug!(session_id, "opening chat stream");

        let request = ChatRequest {
            name: name.to_string(),
            prompt: prompt.to_string(),
            session_id,
            attached_files: Vec::new(),
        };
        let inner = client.chat(request).await?.into_inner();
        Ok(ChatStream { inner })
    }

    /// Deletes one session's history on the remote side.
    pub async fn remove_session(&self, session_id: i64) -> Result<(), ConnectorError> {
        let mut client = self.client().await?;
        let resp = client
            .remove_session(RemoveSessionRequest { session_id })
            .await?;
        if resp.into_inner().success {
            info!(session_id, "session removed");
            Ok(())
        } else {
            Err(ConnectorError::SessionNotRemoved(session_id))
        }
    }
}

/// Finite stream of text fragments from one chat call.
///
/// Fragments arrive in model order; empty keep-alive chunks are skipped.
/// Once consumed (or broken) the stream is done and cannot be restarted.
pub struct ChatStream {
    inner: tonic::codec::Streaming<ChatChunk>,
}

impl ChatStream {
    /// Next text fragment, `Ok(None)` at end of stream.
    pub async fn next_chunk(&mut self) -> Result<Option<String>, ConnectorError> {
        loop {
            match self.inner.message().await? {
                Some(chunk) if chunk.message.is_empty() => continue,
                Some(chunk) => return Ok(Some(chunk.message)),
                None => return Ok(None),
            }
        }
    }
}

/// Rejection-samples an id in `0..SESSION_ID_SPACE` that is not in
/// `existing`.
///
/// The space holds 10^8 ids, so in practice this terminates on the first
/// or second draw even with a large history.
pub fn pick_session_id(existing: &[i64], mut rng: impl Rng) -> i64 {
    loop {
        let candidate = rng.gen_range(0..SESSION_ID_SPACE);
        if !existing.contains(&candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn session_id_within_space() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let id = pick_session_id(&[], &mut rng);
            assert!((0..SESSION_ID_SPACE).contains(&id));
        }
    }

    #[test]
    fn session_id_avoids_existing() {
        // Same seed twice: the second run must reject the first draw and
        // settle on the next one.
        let first = pick_session_id(&[], StdRng::seed_from_u64(42));
        let second = pick_session_id(&[first], StdRng::seed_from_u64(42));
        assert_ne!(first, second);
    }

    #[test]
    fn history_blob_parses_and_skips_idless_records() {
        let blob = r#"[
            {"sid": 12345678, "title": "hello"},
            {"title": "no id here"},
            {"sid": 42}
        ]"#;
        let records: Vec<SessionRecord> = serde_json::from_str(blob).unwrap();
        let ids: Vec<i64> = records.iter().filter_map(|r| r.sid).collect();
        assert_eq!(ids, vec![12345678, 42]);
    }

    #[test]
    fn malformed_history_blob_is_an_error() {
        let err = serde_json::from_str::<Vec<SessionRecord>>("not json").unwrap_err();
        let err: ConnectorError = err.into();
        assert!(matches!(err, ConnectorError::InvalidHistory(_)));
    }
}
