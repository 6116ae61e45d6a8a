//! Repository for the `sectors` table.

use academy_core::types::DbId;
use sqlx::PgPool;

use crate::models::sector::{CreateSector, Sector};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at";

/// Provides create, read and rename operations for sectors.
pub struct SectorRepo;

impl SectorRepo {
    /// Insert a new sector, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSector) -> Result<Sector, sqlx::Error> {
        let query = format!("INSERT INTO sectors (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Sector>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a sector by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sector>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sectors WHERE id = $1");
        sqlx::query_as::<_, Sector>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Rename a sector. Returns `None` if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateSector,
    ) -> Result<Option<Sector>, sqlx::Error> {
        let query = format!("UPDATE sectors SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Sector>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// List all sectors ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Sector>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sectors ORDER BY name ASC");
        sqlx::query_as::<_, Sector>(&query).fetch_all(pool).await
    }
}
