use std::sync::Arc;

use gameshelf_core::i18n::Translate;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind an `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gameshelf_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Message catalog used for every localized string in responses.
    pub translator: Arc<dyn Translate>,
}
