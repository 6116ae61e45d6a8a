//! Handlers for the video catalogue.

use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_core::youtube_ids::extract_youtube_id;
use academy_db::models::video::{CreateVideo, UpdateVideo, Video};
use academy_db::repositories::{SectorRepo, VideoRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /videos`.
#[derive(Debug, Deserialize)]
pub struct VideoListParams {
    pub sector_id: Option<DbId>,
}

/// Request body for `POST /admin/videos` and `PUT /admin/videos/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct VideoRequest {
    /// A watch, short, embed URL or a bare 11-character id.
    pub youtube_url: String,
    #[validate(length(min = 1, max = 500, message = "Title must be 1-500 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub sector_id: DbId,
}

/// A [`VideoRequest`] that passed validation.
struct CheckedVideo {
    youtube_id: String,
    title: String,
    description: Option<String>,
    sector_id: DbId,
}

/// Trim and validate the body, resolve the YouTube id, and make sure the
/// target sector exists. The database is only touched for the sector lookup,
/// after everything else has passed.
async fn check_video_request(state: &AppState, input: VideoRequest) -> AppResult<CheckedVideo> {
    let input = VideoRequest {
        title: input.title.trim().to_string(),
        ..input
    };
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let youtube_id = extract_youtube_id(&input.youtube_url)
        .ok_or_else(|| AppError::BadRequest("Invalid YouTube video URL or id".into()))?;

    SectorRepo::find_by_id(&state.pool, input.sector_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sector",
            id: input.sector_id,
        }))?;

    Ok(CheckedVideo {
        youtube_id,
        title: input.title,
        description: input.description.filter(|d| !d.trim().is_empty()),
        sector_id: input.sector_id,
    })
}

/// GET /api/v1/videos?sector_id=
pub async fn list_videos(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<VideoListParams>,
) -> AppResult<Json<DataResponse<Vec<Video>>>> {
    let videos = VideoRepo::list(&state.pool, params.sector_id).await?;
    Ok(Json(DataResponse { data: videos }))
}

/// POST /api/v1/admin/videos
///
/// Adds a single video by hand. The publish date stays unknown until the
/// next backfill.
pub async fn add_video(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<VideoRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Video>>)> {
    let checked = check_video_request(&state, input).await?;

    let video = VideoRepo::create(
        &state.pool,
        &CreateVideo {
            youtube_id: checked.youtube_id,
            title: checked.title,
            description: checked.description,
            sector_id: checked.sector_id,
            published_at: None,
            created_by: Some(admin.user_id),
        },
    )
    .await?;
    tracing::info!(video_id = %video.id, youtube_id = %video.youtube_id, "Video added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: video })))
}

/// PUT /api/v1/admin/videos/{id}
///
/// Replaces title, description, sector and YouTube link. Moving to another
/// YouTube id already stored elsewhere yields 409.
pub async fn update_video(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<VideoRequest>,
) -> AppResult<Json<DataResponse<Video>>> {
    let checked = check_video_request(&state, input).await?;

    let video = VideoRepo::update(
        &state.pool,
        id,
        &UpdateVideo {
            youtube_id: checked.youtube_id,
            title: checked.title,
            description: checked.description,
            sector_id: checked.sector_id,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Video",
        id,
    }))?;
    tracing::info!(video_id = %id, user_id = %admin.user_id, "Video updated");

    Ok(Json(DataResponse { data: video }))
}

/// DELETE /api/v1/admin/videos/{id}
///
/// Watch progress of the video goes with it.
pub async fn delete_video(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !VideoRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }));
    }
    tracing::info!(video_id = %id, user_id = %admin.user_id, "Video deleted");
    Ok(StatusCode::NO_CONTENT)
}
