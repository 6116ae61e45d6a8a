//! Repository for the `profiles` table.

use academy_core::roles::ROLE_EMPLOYEE;
use academy_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{Profile, UpsertProfile, UserWithRole};

const COLUMNS: &str = "id, email, full_name, created_at, updated_at";

/// Provides profile upserts and the admin user listing.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Create the profile for `user_id` or refresh it.
    ///
    /// `None` fields keep their stored value.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (id, email, full_name) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET
                email = COALESCE(EXCLUDED.email, profiles.email),
                full_name = COALESCE(EXCLUDED.full_name, profiles.full_name),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.email)
            .bind(&input.full_name)
            .fetch_one(pool)
            .await
    }

    /// Every user with a profile or a role assignment, newest first.
    pub async fn list_with_roles(pool: &PgPool) -> Result<Vec<UserWithRole>, sqlx::Error> {
        sqlx::query_as::<_, UserWithRole>(
            "SELECT COALESCE(p.id, r.user_id) AS id,
                    p.email,
                    p.full_name,
                    COALESCE(r.role, $1) AS role,
                    COALESCE(p.created_at, r.created_at) AS created_at
             FROM profiles p
             FULL OUTER JOIN user_roles r ON r.user_id = p.id
             ORDER BY created_at DESC, id",
        )
        .bind(ROLE_EMPLOYEE)
        .fetch_all(pool)
        .await
    }
}
