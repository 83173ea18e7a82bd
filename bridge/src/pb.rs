//! Bindings for `proto/superbuilder.proto`.
//!
//! Hand-maintained in codegen shape (prost messages, tonic client and
//! server stubs) so the crate builds without a protoc toolchain. Keep this
//! file and the proto file in sync when the remote contract changes.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SayHelloRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SayHelloResponse {
    #[prost(string, tag = "1")]
    pub message: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct LoadModelsRequest {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct LoadModelsResponse {
    #[prost(bool, tag = "1")]
    pub status: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetChatHistoryRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetChatHistoryResponse {
    /// JSON-encoded list of session records.
    #[prost(string, tag = "1")]
    pub data: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChatRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub prompt: String,
    #[prost(int64, tag = "3")]
    pub session_id: i64,
    #[prost(string, repeated, tag = "4")]
    pub attached_files: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChatChunk {
    #[prost(string, tag = "1")]
    pub message: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct RemoveSessionRequest {
    #[prost(int64, tag = "1")]
    pub session_id: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct RemoveSessionResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DisconnectClientRequest {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DisconnectClientResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
}

pub mod super_builder_client {
    use super::*;
    use tonic::codegen::http::uri::PathAndQuery;
    use tonic::transport::Channel;

    /// Client stub for the `superbuilder.SuperBuilder` service.
    #[derive(Debug, Clone)]
    pub struct SuperBuilderClient {
        inner: tonic::client::Grpc<Channel>,
    }

    impl SuperBuilderClient {
        pub fn new(channel: Channel) -> Self {
            Self {
                inner: tonic::client::Grpc::new(channel),
            }
        }

        async fn ready(&mut self) -> Result<(), tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| tonic::Status::unavailable(format!("service was not ready: {e}")))
        }

        pub async fn say_hello(
            &mut self,
            request: impl tonic::IntoRequest<SayHelloRequest>,
        ) -> Result<tonic::Response<SayHelloResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = PathAndQuery::from_static("/superbuilder.SuperBuilder/SayHello");
            self.inner.unary(request.into_request(), path, codec).await
        }

        pub async fn say_hello_pyllm(
            &mut self,
            request: impl tonic::IntoRequest<SayHelloRequest>,
        ) -> Result<tonic::Response<SayHelloResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = PathAndQuery::from_static("/superbuilder.SuperBuilder/SayHelloPyllm");
            self.inner.unary(request.into_request(), path, codec).await
        }

        pub async fn load_models(
            &mut self,
            request: impl tonic::IntoRequest<LoadModelsRequest>,
        ) -> Result<tonic::Response<LoadModelsResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = PathAndQuery::from_static("/superbuilder.SuperBuilder/LoadModels");
            self.inner.unary(request.into_request(), path, codec).await
        }

        pub async fn get_chat_history(
            &mut self,
            request: impl tonic::IntoRequest<GetChatHistoryRequest>,
        ) -> Result<tonic::Response<GetChatHistoryResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = PathAndQuery::from_static("/superbuilder.SuperBuilder/GetChatHistory");
            self.inner.unary(request.into_request(), path, codec).await
        }

        pub async fn chat(
            &mut self,
            request: impl tonic::IntoRequest<ChatRequest>,
        ) -> Result<tonic::Response<tonic::codec::Streaming<ChatChunk>>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = PathAndQuery::from_static("/superbuilder.SuperBuilder/Chat");
            self.inner
                .server_streaming(request.into_request(), path, codec)
                .await
        }

        pub async fn remove_session(
            &mut self,
            request: impl tonic::IntoRequest<RemoveSessionRequest>,
        ) -> Result<tonic::Response<RemoveSessionResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = PathAndQuery::from_static("/superbuilder.SuperBuilder/RemoveSession");
            self.inner.unary(request.into_request(), path, codec).await
        }

        pub async fn disconnect_client(
            &mut self,
            request: impl tonic::IntoRequest<DisconnectClientRequest>,
        ) -> Result<tonic::Response<DisconnectClientResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = PathAndQuery::from_static("/superbuilder.SuperBuilder/DisconnectClient");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
}

pub mod super_builder_server {
    use super::*;
    use tonic::codegen::*;

    /// Server-side trait for the `superbuilder.SuperBuilder` service.
    ///
    /// The production service lives on the remote side; this exists so tests
    /// can stand up an in-process double behind a real socket.
    #[async_trait]
    pub trait SuperBuilder: Send + Sync + 'static {
        async fn say_hello(
            &self,
            request: tonic::Request<SayHelloRequest>,
        ) -> Result<tonic::Response<SayHelloResponse>, tonic::Status>;

        async fn say_hello_pyllm(
            &self,
            request: tonic::Request<SayHelloRequest>,
        ) -> Result<tonic::Response<SayHelloResponse>, tonic::Status>;

        async fn load_models(
            &self,
            request: tonic::Request<LoadModelsRequest>,
        ) -> Result<tonic::Response<LoadModelsResponse>, tonic::Status>;

        async fn get_chat_history(
            &self,
            request: tonic::Request<GetChatHistoryRequest>,
        ) -> Result<tonic::Response<GetChatHistoryResponse>, tonic::Status>;

        /// Server streaming response type for the Chat method.
        type ChatStream: tokio_stream::Stream<Item = Result<ChatChunk, tonic::Status>>
            + Send
            + 'static;

        async fn chat(
            &self,
            request: tonic::Request<ChatRequest>,
        ) -> Result<tonic::Response<Self::ChatStream>, tonic::Status>;

        async fn remove_session(
            &self,
            request: tonic::Request<RemoveSessionRequest>,
        ) -> Result<tonic::Response<RemoveSessionResponse>, tonic::Status>;

        async fn disconnect_client(
            &self,
            request: tonic::Request<DisconnectClientRequest>,
        ) -> Result<tonic::Response<DisconnectClientResponse>, tonic::Status>;
    }

    #[derive(Debug)]
    pub struct SuperBuilderServer<T> {
        inner: Arc<T>,
    }

    impl<T> SuperBuilderServer<T> {
        pub fn new(inner: T) -> Self {
            Self {
                inner: Arc::new(inner),
            }
        }

        pub fn from_arc(inner: Arc<T>) -> Self {
            Self { inner }
        }
    }

    impl<T> Clone for SuperBuilderServer<T> {
        fn clone(&self) -> Self {
            Self {
                inner: Arc::clone(&self.inner),
            }
        }
    }

    impl<T, B> Service<http::Request<B>> for SuperBuilderServer<T>
    where
        T: SuperBuilder,
        B: Body + Send + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            match req.uri().path() {
                "/superbuilder.SuperBuilder/SayHello" => {
                    struct SayHelloSvc<T>(Arc<T>);
                    impl<T: SuperBuilder> tonic::server::UnaryService<SayHelloRequest> for SayHelloSvc<T> {
                        type Response = SayHelloResponse;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(&mut self, request: tonic::Request<SayHelloRequest>) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            Box::pin(async move { inner.say_hello(request).await })
                        }
                    }
                    let inner = Arc::clone(&self.inner);
                    Box::pin(async move {
                        let mut grpc = tonic::server::Grpc::new(tonic::codec::ProstCodec::default());
                        Ok(grpc.unary(SayHelloSvc(inner), req).await)
                    })
                }
                "/superbuilder.SuperBuilder/SayHelloPyllm" => {
                    struct SayHelloPyllmSvc<T>(Arc<T>);
                    impl<T: SuperBuilder> tonic::server::UnaryService<SayHelloRequest> for SayHelloPyllmSvc<T> {
                        type Response = SayHelloResponse;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(&mut self, request: tonic::Request<SayHelloRequest>) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            Box::pin(async move { inner.say_hello_pyllm(request).await })
                        }
                    }
                    let inner = Arc::clone(&self.inner);
                    Box::pin(async move {
                        let mut grpc = tonic::server::Grpc::new(tonic::codec::ProstCodec::default());
                        Ok(grpc.unary(SayHelloPyllmSvc(inner), req).await)
                    })
                }
                "/superbuilder.SuperBuilder/LoadModels" => {
                    struct LoadModelsSvc<T>(Arc<T>);
                    impl<T: SuperBuilder> tonic::server::UnaryService<LoadModelsRequest> for LoadModelsSvc<T> {
                        type Response = LoadModelsResponse;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(&mut self, request: tonic::Request<LoadModelsRequest>) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            Box::pin(async move { inner.load_models(request).await })
                        }
                    }
                    let inner = Arc::clone(&self.inner);
                    Box::pin(async move {
                        let mut grpc = tonic::server::Grpc::new(tonic::codec::ProstCodec::default());
                        Ok(grpc.unary(LoadModelsSvc(inner), req).await)
                    })
                }
                "/superbuilder.SuperBuilder/GetChatHistory" => {
                    struct GetChatHistorySvc<T>(Arc<T>);
                    impl<T: SuperBuilder> tonic::server::UnaryService<GetChatHistoryRequest>
                        for GetChatHistorySvc<T>
                    {
                        type Response = GetChatHistoryResponse;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<GetChatHistoryRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            Box::pin(async move { inner.get_chat_history(request).await })
                        }
                    }
                    let inner = Arc::clone(&self.inner);
                    Box::pin(async move {
                        let mut grpc = tonic::server::Grpc::new(tonic::codec::ProstCodec::default());
                        Ok(grpc.unary(GetChatHistorySvc(inner), req).await)
                    })
                }
                "/superbuilder.SuperBuilder/Chat" => {
                    struct ChatSvc<T>(Arc<T>);
                    impl<T: SuperBuilder> tonic::server::ServerStreamingService<ChatRequest> for ChatSvc<T> {
                        type Response = ChatChunk;
                        type ResponseStream = T::ChatStream;
                        type Future =
                            BoxFuture<tonic::Response<Self::ResponseStream>, tonic::Status>;
                        fn call(&mut self, request: tonic::Request<ChatRequest>) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            Box::pin(async move { inner.chat(request).await })
                        }
                    }
                    let inner = Arc::clone(&self.inner);
                    Box::pin(async move {
                        let mut grpc = tonic::server::Grpc::new(tonic::codec::ProstCodec::default());
                        Ok(grpc.server_streaming(ChatSvc(inner), req).await)
                    })
                }
                "/superbuilder.SuperBuilder/RemoveSession" => {
                    struct RemoveSessionSvc<T>(Arc<T>);
                    impl<T: SuperBuilder> tonic::server::UnaryService<RemoveSessionRequest>
                        for RemoveSessionSvc<T>
                    {
                        type Response = RemoveSessionResponse;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<RemoveSessionRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            Box::pin(async move { inner.remove_session(request).await })
                        }
                    }
                    let inner = Arc::clone(&self.inner);
                    Box::pin(async move {
                        let mut grpc = tonic::server::Grpc::new(tonic::codec::ProstCodec::default());
                        Ok(grpc.unary(RemoveSessionSvc(inner), req).await)
                    })
                }
                "/superbuilder.SuperBuilder/DisconnectClient" => {
                    struct DisconnectClientSvc<T>(Arc<T>);
                    impl<T: SuperBuilder> tonic::server::UnaryService<DisconnectClientRequest>
                        for DisconnectClientSvc<T>
                    {
                        type Response = DisconnectClientResponse;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<DisconnectClientRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            Box::pin(async move { inner.disconnect_client(request).await })
                        }
                    }
                    let inner = Arc::clone(&self.inner);
                    Box::pin(async move {
                        let mut grpc = tonic::server::Grpc::new(tonic::codec::ProstCodec::default());
                        Ok(grpc.unary(DisconnectClientSvc(inner), req).await)
                    })
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", tonic::Code::Unimplemented as i32)
                        .header("content-type", "application/grpc")
                        .body(empty_body())
                        .unwrap())
                }),
            }
        }
    }

    impl<T: SuperBuilder> tonic::server::NamedService for SuperBuilderServer<T> {
        const NAME: &'static str = "superbuilder.SuperBuilder";
    }
}
