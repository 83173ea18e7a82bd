//! Shared building blocks for the Super Builder chat bridge.
//!
//! This crate holds what both halves of the system must agree on:
//!
//! - **Schema**: the JSON bodies exchanged over the bridge's HTTP surface
//! - **Initialization**: [`init_tracing`] for consistent logging setup
//!
//! The field names in [`schema`] are the wire contract between the bridge
//! server and its clients; renaming one is a breaking change.

pub mod init;
pub mod schema;

// Re-export commonly used items at crate root
pub use init::init_tracing;
pub use schema::{
    ChatRequest, ErrorResponse, HealthResponse, ReconnectResponse, ServiceInfo,
    DEFAULT_CLIENT_NAME,
};
