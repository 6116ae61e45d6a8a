//! Privileged role lookup.

use academy_core::types::DbId;
use academy_db::repositories::UserRoleRepo;
use academy_db::DbPool;
use async_trait::async_trait;

/// Resolves a user's role from server-side data, never from the token.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// The user's role name, or `None` if no role is assigned.
    async fn role_of(&self, user_id: DbId) -> Result<Option<String>, sqlx::Error>;
}

/// [`RoleDirectory`] backed by the `user_roles` table.
#[derive(Debug, Clone)]
pub struct PgRoleDirectory {
    pool: DbPool,
}

impl PgRoleDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleDirectory for PgRoleDirectory {
    async fn role_of(&self, user_id: DbId) -> Result<Option<String>, sqlx::Error> {
        Ok(UserRoleRepo::find_by_user_id(&self.pool, user_id)
            .await?
            .map(|r| r.role))
    }
}
