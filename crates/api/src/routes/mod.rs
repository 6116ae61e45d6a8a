pub mod admin;
pub mod catalogue;
pub mod health;
pub mod youtube;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /youtube/sync                                    sync or backfill (admin only)
///
/// /sectors                                         list (requires auth)
/// /videos?sector_id=                               list (requires auth)
/// /videos/{id}/progress                            get, set own watched state (requires auth)
/// /me                                              upsert own profile (requires auth)
/// /me/progress                                     list own watched state (requires auth)
///
/// /admin/sectors                                   create (admin only)
/// /admin/sectors/{id}                              rename (admin only)
/// /admin/playlist-mappings                         list, create (admin only)
/// /admin/playlist-mappings/{id}                    delete (admin only)
/// /admin/videos                                    manual add (admin only)
/// /admin/videos/{id}                               update, delete (admin only)
/// /admin/users                                     list with roles (admin only)
/// /admin/users/{id}/role                           assign role (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/youtube", youtube::router())
        .merge(catalogue::router())
        .nest("/admin", admin::router())
}
