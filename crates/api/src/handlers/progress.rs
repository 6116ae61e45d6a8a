//! Per-user watched progress on videos.

use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_db::models::video_progress::VideoProgress;
use academy_db::repositories::{VideoProgressRepo, VideoRepo};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub watched: bool,
}

async fn ensure_video_exists(state: &AppState, video_id: DbId) -> AppResult<()> {
    VideoRepo::find_by_id(&state.pool, video_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: video_id,
        }))?;
    Ok(())
}

/// GET /api/v1/videos/{id}/progress
pub async fn get_progress(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(video_id): Path<DbId>,
) -> AppResult<Json<DataResponse<VideoProgress>>> {
    ensure_video_exists(&state, video_id).await?;
    let progress = VideoProgressRepo::find(&state.pool, user.user_id, video_id)
        .await?
        .unwrap_or_else(|| VideoProgress::unwatched(video_id));
    Ok(Json(DataResponse { data: progress }))
}

/// PUT /api/v1/videos/{id}/progress
///
/// Marking a video unwatched clears `watched_at`.
pub async fn put_progress(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(video_id): Path<DbId>,
    Json(input): Json<UpdateProgressRequest>,
) -> AppResult<Json<DataResponse<VideoProgress>>> {
    ensure_video_exists(&state, video_id).await?;
    let progress =
        VideoProgressRepo::upsert(&state.pool, user.user_id, video_id, input.watched).await?;
    tracing::debug!(video_id = %video_id, user_id = %user.user_id, watched = input.watched, "Progress saved");
    Ok(Json(DataResponse { data: progress }))
}

/// GET /api/v1/me/progress
///
/// Only videos the caller has touched are listed.
pub async fn list_my_progress(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<VideoProgress>>>> {
    let progress = VideoProgressRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: progress }))
}
