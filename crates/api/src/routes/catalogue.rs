//! Catalogue and per-user routes available to every signed-in user.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{profile, progress, sectors, videos};
use crate::state::AppState;

/// ```text
/// GET /sectors              -> list_sectors
/// GET /videos               -> list_videos
/// GET /videos/{id}/progress -> get_progress
/// PUT /videos/{id}/progress -> put_progress
/// PUT /me                   -> update_profile
/// GET /me/progress          -> list_my_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sectors", get(sectors::list_sectors))
        .route("/videos", get(videos::list_videos))
        .route(
            "/videos/{id}/progress",
            get(progress::get_progress).put(progress::put_progress),
        )
        .route("/me", put(profile::update_profile))
        .route("/me/progress", get(progress::list_my_progress))
}
