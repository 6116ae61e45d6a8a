//! The caller's own profile.

use academy_core::error::CoreError;
use academy_db::models::profile::{Profile, UpsertProfile};
use academy_db::repositories::ProfileRepo;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 200, message = "Full name must be at most 200 characters"))]
    pub full_name: Option<String>,
}

/// PUT /api/v1/me
///
/// Creates or refreshes the caller's profile. The e-mail address comes from
/// the token, never from the body. Omitted fields keep their stored value.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let input = UpdateProfileRequest {
        full_name: input
            .full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    };
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let profile = ProfileRepo::upsert(
        &state.pool,
        user.user_id,
        &UpsertProfile {
            email: user.email,
            full_name: input.full_name,
        },
    )
    .await?;
    Ok(Json(DataResponse { data: profile }))
}
