//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{playlist_mappings, sectors, users, videos};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// POST   /sectors                   -> create_sector
/// PUT    /sectors/{id}              -> update_sector
/// GET    /playlist-mappings         -> list_mappings
/// POST   /playlist-mappings         -> create_mapping
/// DELETE /playlist-mappings/{id}    -> delete_mapping
/// POST   /videos                    -> add_video
/// PUT    /videos/{id}               -> update_video
/// DELETE /videos/{id}               -> delete_video
/// GET    /users                     -> list_users
/// PUT    /users/{id}/role           -> update_user_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sectors", post(sectors::create_sector))
        .route("/sectors/{id}", put(sectors::update_sector))
        .route(
            "/playlist-mappings",
            get(playlist_mappings::list_mappings).post(playlist_mappings::create_mapping),
        )
        .route(
            "/playlist-mappings/{id}",
            delete(playlist_mappings::delete_mapping),
        )
        .route("/videos", post(videos::add_video))
        .route(
            "/videos/{id}",
            put(videos::update_video).delete(videos::delete_video),
        )
        .route("/users", get(users::list_users))
        .route("/users/{id}/role", put(users::update_user_role))
}
