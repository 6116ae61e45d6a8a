//! Repository for the `youtube_playlist_mappings` table.

use academy_core::types::DbId;
use sqlx::PgPool;

use crate::models::playlist_mapping::{CreatePlaylistMapping, PlaylistMapping};

const COLUMNS: &str = "id, playlist_id, playlist_name, sector_id, created_at";

/// Provides CRUD operations for playlist mappings.
pub struct PlaylistMappingRepo;

impl PlaylistMappingRepo {
    /// Insert a new mapping, returning the created row.
    ///
    /// Registering the same playlist twice fails with a unique violation on
    /// `uq_youtube_playlist_mappings_playlist_id`.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePlaylistMapping,
    ) -> Result<PlaylistMapping, sqlx::Error> {
        let query = format!(
            "INSERT INTO youtube_playlist_mappings (playlist_id, playlist_name, sector_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlaylistMapping>(&query)
            .bind(&input.playlist_id)
            .bind(&input.playlist_name)
            .bind(input.sector_id)
            .fetch_one(pool)
            .await
    }

    /// List all mappings, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PlaylistMapping>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM youtube_playlist_mappings ORDER BY created_at DESC, id"
        );
        sqlx::query_as::<_, PlaylistMapping>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete a mapping. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM youtube_playlist_mappings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
