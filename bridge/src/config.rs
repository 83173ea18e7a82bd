//! Connector settings for the Super Builder gRPC endpoint.

use std::time::Duration;

use sb_common::DEFAULT_CLIENT_NAME;

pub const DEFAULT_GRPC_HOST: &str = "localhost";
pub const DEFAULT_GRPC_PORT: u16 = 5006;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 15;

/// Where the Super Builder service lives and how to talk to it.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    pub host: String,
    pub port: u16,
    /// Channel establishment deadline.
    pub connect_timeout: Duration,
    /// Identity sent with hello and chat calls.
    pub client_name: String,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_GRPC_HOST.to_string(),
            port: DEFAULT_GRPC_PORT,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
        }
    }
}

impl ConnectorConfig {
    /// URL for the tonic endpoint.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
