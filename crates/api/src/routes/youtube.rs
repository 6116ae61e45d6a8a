//! Route definitions for the `/youtube` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::youtube_sync;
use crate::state::AppState;

/// Routes mounted at `/youtube`.
///
/// ```text
/// POST /sync -> sync_youtube
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/sync", post(youtube_sync::sync_youtube))
}
