//! User management: listing known users and assigning roles.

use academy_core::error::CoreError;
use academy_core::roles::{check_role_change, is_valid_role, ROLES, ROLE_ADMIN};
use academy_core::types::DbId;
use academy_db::models::profile::UserWithRole;
use academy_db::models::user_role::UserRole;
use academy_db::repositories::{ProfileRepo, UserRoleRepo};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserWithRole>>>> {
    let users = ProfileRepo::list_with_roles(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Assigns `admin` or `employee`. Demoting the last admin yields 409.
pub async fn update_user_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<DbId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<DataResponse<UserRole>>> {
    let role = input.role.trim();
    if !is_valid_role(role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{role}'. Expected one of: {}",
            ROLES.join(", ")
        ))));
    }

    let current = UserRoleRepo::find_by_user_id(&state.pool, user_id).await?;
    let admins = UserRoleRepo::count_by_role(&state.pool, ROLE_ADMIN).await?;
    check_role_change(current.as_ref().map(|r| r.role.as_str()), role, admins)?;

    let assigned = UserRoleRepo::upsert(&state.pool, user_id, role).await?;
    tracing::info!(
        target_user = %user_id,
        user_id = %admin.user_id,
        role = %assigned.role,
        "User role changed"
    );

    Ok(Json(DataResponse { data: assigned }))
}
