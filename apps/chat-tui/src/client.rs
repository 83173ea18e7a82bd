//! HTTP client for the bridge.
//!
//! Wraps the bridge's REST surface: health polls and the streaming chat
//! endpoint. Chat responses are read off the wire in a spawned task and
//! forwarded over a channel so the render loop never blocks on the network.

use std::time::Duration;

use sb_common::schema::{ChatRequest, ErrorResponse, HealthResponse};
use tokio::sync::mpsc;

/// Client identity reported with every chat request.
const CLIENT_NAME: &str = "chat-tui";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// A silent stream is treated as dead after this long.
const READ_TIMEOUT: Duration = Duration::from_secs(60);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Events produced by one streaming chat request.
#[derive(Clone, Debug)]
pub enum StreamEvent {
    /// A text fragment of the reply.
    Chunk(String),
    /// The reply ended normally.
    Done,
    /// The request or the stream failed; the reply is over.
    Failed(String),
}

#[derive(Clone)]
pub struct BridgeClient {
    base_url: String,
    http: reqwest::Client,
}

impl BridgeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .read_timeout(READ_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One health poll. `None` when the bridge itself is unreachable.
    pub async fn health(&self) -> Option<HealthResponse> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .http
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .ok()?;
        resp.json().await.ok()
    }

    /// Starts a streaming chat request and returns the event channel.
    ///
    /// The channel always ends with exactly one `Done` or `Failed`.
    pub fn stream_chat(&self, prompt: String, session_id: i64) -> mpsc::Receiver<StreamEvent> {
        let (tx, rx) = mpsc::channel(100);
        let http = self.http.clone();
        let url = format!("{}/chat", self.base_url);

        tokio::spawn(async move {
            let request = ChatRequest {
                prompt,
                session_id: Some(session_id),
                name: CLIENT_NAME.to_string(),
            };

            let resp = match http.post(&url).json(&request).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    tracing::error!("Chat request failed: {}", e);
                    let _ = tx
                        .send(StreamEvent::Failed(format!("request failed: {e}")))
                        .await;
                    return;
                }
            };

            if !resp.status().is_success() {
                let status = resp.status();
                let detail = resp.text().await.map(|b| error_detail(&b)).unwrap_or_default();
                let msg = if detail.is_empty() {
                    format!("bridge returned {status}")
                } else {
                    format!("bridge returned {status}: {detail}")
                };
                let _ = tx.send(StreamEvent::Failed(msg)).await;
                return;
            }

            use futures_util::StreamExt;
            let mut stream = resp.bytes_stream();
            let mut carry: Vec<u8> = Vec::new();

            while let Some(chunk) = stream.next().await {
                match chunk {
                    Ok(bytes) => {
                        carry.extend_from_slice(&bytes);
                        let text = take_complete_utf8(&mut carry);
                        if !text.is_empty() && tx.send(StreamEvent::Chunk(text)).await.is_err() {
                            // Receiver is gone; stop reading.
                            return;
                        }
                    }
                    Err(e) => {
                        let _ = tx
                            .send(StreamEvent::Failed(format!("stream failed: {e}")))
                            .await;
                        return;
                    }
                }
            }

            if !carry.is_empty() {
                let tail = String::from_utf8_lossy(&carry).into_owned();
                let _ = tx.send(StreamEvent::Chunk(tail)).await;
            }
            let _ = tx.send(StreamEvent::Done).await;
        });

        rx
    }
}

/// Extracts the `error` field from a JSON error body, falling back to the
/// raw text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Splits the decodable prefix out of `buf`.
///
/// Network chunks can end mid code point; the incomplete tail stays in `buf`
/// until the next chunk completes it. Bytes that can never decode are
/// replaced rather than held forever.
fn take_complete_utf8(buf: &mut Vec<u8>) -> String {
    match std::str::from_utf8(buf) {
        Ok(s) => {
            let s = s.to_string();
            buf.clear();
            s
        }
        Err(e) if e.error_len().is_none() => {
            let valid = e.valid_up_to();
            let s = String::from_utf8_lossy(&buf[..valid]).into_owned();
            buf.drain(..valid);
            s
        }
        Err(_) => {
            let s = String::from_utf8_lossy(buf).into_owned();
            buf.clear();
            s
        }
    }
}
