//! Shared server state

use std::sync::Arc;

use crate::connector::BackendConnector;

/// State shared across web handlers.
///
/// The connector is constructed before the router, so handlers never see a
/// half-initialized service.
#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<BackendConnector>,
}

impl AppState {
    pub fn new(connector: Arc<BackendConnector>) -> Self {
        Self { connector }
    }
}
