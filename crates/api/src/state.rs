use std::sync::Arc;

use trackshare_store::RowStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, including the server API key for the share table.
    pub config: Arc<ServerConfig>,
    /// The share table.
    pub store: Arc<dyn RowStore>,
}
