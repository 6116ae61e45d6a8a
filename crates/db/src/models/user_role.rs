//! User role assignment model.

use academy_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRole {
    pub id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
}
