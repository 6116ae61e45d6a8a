//! Handlers for sectors.

use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_db::models::sector::{CreateSector, Sector};
use academy_db::repositories::SectorRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/sectors` and `PUT /admin/sectors/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSectorRequest {
    #[validate(length(min = 1, max = 100, message = "Sector name must be 1-100 characters"))]
    pub name: String,
}

/// GET /api/v1/sectors
pub async fn list_sectors(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Sector>>>> {
    let sectors = SectorRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: sectors }))
}

/// POST /api/v1/admin/sectors
///
/// Names are trimmed before validation. Duplicate names yield 409.
pub async fn create_sector(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateSectorRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Sector>>)> {
    let sector = SectorRepo::create(&state.pool, &checked_sector(input)?).await?;
    tracing::info!(sector_id = %sector.id, user_id = %admin.user_id, "Sector created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: sector })))
}

/// PUT /api/v1/admin/sectors/{id}
///
/// Renames a sector. Same name rules as creation.
pub async fn update_sector(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<CreateSectorRequest>,
) -> AppResult<Json<DataResponse<Sector>>> {
    let sector = SectorRepo::update(&state.pool, id, &checked_sector(input)?)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sector",
            id,
        }))?;
    tracing::info!(sector_id = %id, user_id = %admin.user_id, "Sector renamed");

    Ok(Json(DataResponse { data: sector }))
}

fn checked_sector(input: CreateSectorRequest) -> AppResult<CreateSector> {
    let input = CreateSectorRequest {
        name: input.name.trim().to_string(),
    };
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    Ok(CreateSector { name: input.name })
}
