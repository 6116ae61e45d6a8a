//! User profile model and the admin user listing row.

use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table. `id` is the identity provider's user id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or refreshing a profile.
#[derive(Debug, Deserialize)]
pub struct UpsertProfile {
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// A known user with their effective role, as shown in user management.
///
/// Users appear once they have a profile or a role row. A user without a
/// role row is reported as `employee`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserWithRole {
    pub id: DbId,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
}
