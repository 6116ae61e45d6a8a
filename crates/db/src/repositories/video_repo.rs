//! Repository for the `videos` table.

use academy_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::video::{CreateVideo, MissingPublishDate, UpdateVideo, Video};

const COLUMNS: &str =
    "id, youtube_id, title, description, sector_id, published_at, created_by, created_at";

/// Provides the video operations used by the catalogue and the sync job.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video, returning the created row.
    ///
    /// A `youtube_id` that already exists fails with a unique violation on
    /// `uq_videos_youtube_id`; use [`crate::is_unique_violation`] to detect it.
    pub async fn create(pool: &PgPool, input: &CreateVideo) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (youtube_id, title, description, sector_id, published_at, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.youtube_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.sector_id)
            .bind(input.published_at)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a video by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the editable fields of a video. Returns `None` if it does not
    /// exist.
    ///
    /// Pointing the row at a different `youtube_id` clears `published_at`
    /// so the next backfill fetches the new video's date.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                published_at = CASE WHEN youtube_id = $2 THEN published_at END,
                youtube_id = $2,
                title = $3,
                description = $4,
                sector_id = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.youtube_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.sector_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a video and its watch progress. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List videos, optionally restricted to one sector, most recently
    /// published first (unknown publish dates last).
    pub async fn list(pool: &PgPool, sector_id: Option<DbId>) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos
             WHERE ($1::uuid IS NULL OR sector_id = $1)
             ORDER BY published_at DESC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(sector_id)
            .fetch_all(pool)
            .await
    }

    /// All YouTube ids currently stored, in a single read.
    pub async fn list_youtube_ids(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT youtube_id FROM videos")
            .fetch_all(pool)
            .await
    }

    /// Videos whose `published_at` is still `NULL`.
    pub async fn list_missing_published_at(
        pool: &PgPool,
    ) -> Result<Vec<MissingPublishDate>, sqlx::Error> {
        sqlx::query_as::<_, MissingPublishDate>(
            "SELECT id, youtube_id FROM videos WHERE published_at IS NULL ORDER BY created_at",
        )
        .fetch_all(pool)
        .await
    }

    /// Fill in `published_at` for a video that does not have one yet.
    ///
    /// Returns `true` if the row was updated. Rows that already carry a
    /// timestamp are never overwritten.
    pub async fn set_published_at(
        pool: &PgPool,
        id: DbId,
        published_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE videos SET published_at = $2 WHERE id = $1 AND published_at IS NULL",
        )
        .bind(id)
        .bind(published_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
