use std::sync::Arc;

use crate::config::ServerConfig;

/// State handed to every handler through `State<AppState>`. Cloned per
/// request; both fields are shared handles.
#[derive(Clone)]
pub struct AppState {
    pub pool: codenote_db::DbPool,
    pub config: Arc<ServerConfig>,
}
