//! Handlers for playlist-to-sector mappings.
//!
//! Mappings are what the sync job reads. All handlers require the `admin`
//! role via [`RequireAdmin`].

use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_core::youtube_ids::extract_playlist_id;
use academy_db::models::playlist_mapping::{CreatePlaylistMapping, PlaylistMapping};
use academy_db::repositories::{PlaylistMappingRepo, SectorRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/playlist-mappings`.
#[derive(Debug, Deserialize)]
pub struct CreatePlaylistMappingRequest {
    /// A playlist URL (anything with a `list=` parameter) or a bare id.
    pub playlist: String,
    pub playlist_name: Option<String>,
    pub sector_id: DbId,
}

/// GET /api/v1/admin/playlist-mappings
pub async fn list_mappings(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<PlaylistMapping>>>> {
    let mappings = PlaylistMappingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: mappings }))
}

/// POST /api/v1/admin/playlist-mappings
pub async fn create_mapping(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreatePlaylistMappingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PlaylistMapping>>)> {
    let playlist_id = extract_playlist_id(&input.playlist).ok_or_else(|| {
        AppError::BadRequest("Invalid YouTube playlist URL or id".into())
    })?;

    SectorRepo::find_by_id(&state.pool, input.sector_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sector",
            id: input.sector_id,
        }))?;

    let playlist_name = input
        .playlist_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let mapping = PlaylistMappingRepo::create(
        &state.pool,
        &CreatePlaylistMapping {
            playlist_id,
            playlist_name,
            sector_id: input.sector_id,
        },
    )
    .await?;
    tracing::info!(
        mapping_id = %mapping.id,
        playlist_id = %mapping.playlist_id,
        user_id = %admin.user_id,
        "Playlist mapping created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: mapping })))
}

/// DELETE /api/v1/admin/playlist-mappings/{id}
pub async fn delete_mapping(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PlaylistMappingRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PlaylistMapping",
            id,
        }));
    }
    tracing::info!(mapping_id = %id, user_id = %admin.user_id, "Playlist mapping deleted");
    Ok(StatusCode::NO_CONTENT)
}
