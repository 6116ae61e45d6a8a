use std::sync::Arc;

use academy_sync::{SyncStore, VideoPlatform};

use crate::auth::roles::RoleDirectory;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly by the catalogue handlers.
    pub pool: academy_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Privileged role lookup used by the admin extractor.
    pub roles: Arc<dyn RoleDirectory>,
    /// Store the sync job reads mappings from and writes videos to.
    pub sync_store: Arc<dyn SyncStore>,
    /// `None` when no YouTube API key is configured; sync requests then fail
    /// with a configuration error.
    pub video_platform: Option<Arc<dyn VideoPlatform>>,
}
