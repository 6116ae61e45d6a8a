//! Repository for the `user_roles` table.

use academy_core::types::DbId;
use sqlx::PgPool;

use crate::models::user_role::UserRole;

const COLUMNS: &str = "id, user_id, role, created_at";

/// Provides role lookups for identity-provider users.
pub struct UserRoleRepo;

impl UserRoleRepo {
    /// Find the role assignment for a user, if any.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserRole>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_roles WHERE user_id = $1");
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Assign `role` to a user, replacing any previous assignment.
    pub async fn upsert(pool: &PgPool, user_id: DbId, role: &str) -> Result<UserRole, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE SET role = EXCLUDED.role
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Number of users holding `role`.
    pub async fn count_by_role(pool: &PgPool, role: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_roles WHERE role = $1")
            .bind(role)
            .fetch_one(pool)
            .await
    }
}
