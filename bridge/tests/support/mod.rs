//! In-process Super Builder double for integration tests.
//!
//! Serves the real gRPC surface on an ephemeral localhost port so the
//! connector and the HTTP layer are exercised over an actual socket.

// Each test binary uses a different slice of the knobs.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::stream::BoxStream;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use sb_bridge::config::ConnectorConfig;
use sb_bridge::pb::super_builder_server::{SuperBuilder, SuperBuilderServer};
use sb_bridge::pb::{
    ChatChunk, ChatRequest, DisconnectClientRequest, DisconnectClientResponse,
    GetChatHistoryRequest, GetChatHistoryResponse, LoadModelsRequest, LoadModelsResponse,
    RemoveSessionRequest, RemoveSessionResponse, SayHelloRequest, SayHelloResponse,
};

/// Scriptable Super Builder service.
///
/// Starts ready with an empty history; tests flip the knobs they care
/// about and read the counters afterwards.
pub struct MockSuperBuilder {
    model_hello: Mutex<String>,
    load_ok: AtomicBool,
    remove_ok: AtomicBool,
    history: Mutex<String>,
    chat_script: Mutex<Vec<Result<String, Status>>>,
    chat_open_error: Mutex<Option<Status>>,
    last_chat: Mutex<Option<ChatRequest>>,
    hello_calls: AtomicUsize,
    load_calls: AtomicUsize,
    history_calls: AtomicUsize,
    chat_calls: AtomicUsize,
    disconnect_calls: AtomicUsize,
}

impl MockSuperBuilder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            model_hello: Mutex::new("ready".to_string()),
            load_ok: AtomicBool::new(true),
            remove_ok: AtomicBool::new(true),
            history: Mutex::new("[]".to_string()),
            chat_script: Mutex::new(Vec::new()),
            chat_open_error: Mutex::new(None),
            last_chat: Mutex::new(None),
            hello_calls: AtomicUsize::new(0),
            load_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
            chat_calls: AtomicUsize::new(0),
            disconnect_calls: AtomicUsize::new(0),
        })
    }

    pub fn set_model_hello(&self, payload: &str) {
        *self.model_hello.lock().unwrap() = payload.to_string();
    }

    pub fn set_load_ok(&self, ok: bool) {
        self.load_ok.store(ok, Ordering::SeqCst);
    }

    pub fn set_remove_ok(&self, ok: bool) {
        self.remove_ok.store(ok, Ordering::SeqCst);
    }

    pub fn set_history(&self, blob: &str) {
        *self.history.lock().unwrap() = blob.to_string();
    }

    pub fn set_chat_script(&self, script: Vec<Result<String, Status>>) {
        *self.chat_script.lock().unwrap() = script;
    }

    pub fn set_chat_open_error(&self, status: Status) {
        *self.chat_open_error.lock().unwrap() = Some(status);
    }

    pub fn last_chat(&self) -> Option<ChatRequest> {
        self.last_chat.lock().unwrap().clone()
    }

    pub fn hello_calls(&self) -> usize {
        self.hello_calls.load(Ordering::SeqCst)
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    pub fn disconnect_calls(&self) -> usize {
        self.disconnect_calls.load(Ordering::SeqCst)
    }
}

#[tonic::async_trait]
impl SuperBuilder for MockSuperBuilder {
    async fn say_hello(
        &self,
        request: Request<SayHelloRequest>,
    ) -> Result<Response<SayHelloResponse>, Status> {
        self.hello_calls.fetch_add(1, Ordering::SeqCst);
        let name = request.into_inner().name;
        Ok(Response::new(SayHelloResponse {
            message: format!("hello {name}"),
        }))
    }

    async fn say_hello_pyllm(
        &self,
        _request: Request<SayHelloRequest>,
    ) -> Result<Response<SayHelloResponse>, Status> {
        self.hello_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Response::new(SayHelloResponse {
            message: self.model_hello.lock().unwrap().clone(),
        }))
    }

    async fn load_models(
        &self,
        _request: Request<LoadModelsRequest>,
    ) -> Result<Response<LoadModelsResponse>, Status> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        let ok = self.load_ok.load(Ordering::SeqCst);
        if ok {
            // A successful load makes the model backend answer ready.
            *self.model_hello.lock().unwrap() = "ready".to_string();
        }
        Ok(Response::new(LoadModelsResponse { status: ok }))
    }

    async fn get_chat_history(
        &self,
        _request: Request<GetChatHistoryRequest>,
    ) -> Result<Response<GetChatHistoryResponse>, Status> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Response::new(GetChatHistoryResponse {
            data: self.history.lock().unwrap().clone(),
        }))
    }

    type ChatStream = BoxStream<'static, Result<ChatChunk, Status>>;

    async fn chat(
        &self,
        request: Request<ChatRequest>,
    ) -> Result<Response<Self::ChatStream>, Status> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_chat.lock().unwrap() = Some(request.into_inner());

        if let Some(status) = self.chat_open_error.lock().unwrap().take() {
            return Err(status);
        }

        let script = self.chat_script.lock().unwrap().clone();
        let chunks = script
            .into_iter()
            .map(|item| item.map(|message| ChatChunk { message }));
        let stream: Self::ChatStream = Box::pin(futures_util::stream::iter(chunks));
        Ok(Response::new(stream))
    }

    async fn remove_session(
        &self,
        _request: Request<RemoveSessionRequest>,
    ) -> Result<Response<RemoveSessionResponse>, Status> {
        Ok(Response::new(RemoveSessionResponse {
            success: self.remove_ok.load(Ordering::SeqCst),
        }))
    }

    async fn disconnect_client(
        &self,
        _request: Request<DisconnectClientRequest>,
    ) -> Result<Response<DisconnectClientResponse>, Status> {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Response::new(DisconnectClientResponse { success: true }))
    }
}

/// Serves the mock on an ephemeral port and returns its address.
///
/// The listener is bound before the server task starts, so connecting
/// right away is safe.
pub async fn spawn(mock: Arc<MockSuperBuilder>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock listener addr");

    tokio::spawn(async move {
        Server::builder()
            .add_service(SuperBuilderServer::from_arc(mock))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .expect("mock server crashed");
    });

    addr
}

/// Connector config pointing at a spawned mock.
pub fn config_for(addr: SocketAddr) -> ConnectorConfig {
    ConnectorConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        connect_timeout: Duration::from_secs(2),
        ..ConnectorConfig::default()
    }
}
