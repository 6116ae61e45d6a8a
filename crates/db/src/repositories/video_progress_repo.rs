//! Repository for the `video_progress` table.

use academy_core::types::DbId;
use sqlx::PgPool;

use crate::models::video_progress::VideoProgress;

const COLUMNS: &str = "video_id, watched, watched_at";

/// Provides per-user watched state.
pub struct VideoProgressRepo;

impl VideoProgressRepo {
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        video_id: DbId,
    ) -> Result<Option<VideoProgress>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM video_progress WHERE user_id = $1 AND video_id = $2");
        sqlx::query_as::<_, VideoProgress>(&query)
            .bind(user_id)
            .bind(video_id)
            .fetch_optional(pool)
            .await
    }

    /// All progress rows of one user.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<VideoProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM video_progress WHERE user_id = $1 ORDER BY watched_at DESC NULLS LAST"
        );
        sqlx::query_as::<_, VideoProgress>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Record whether `user_id` has watched `video_id`.
    ///
    /// Marking as watched stamps `watched_at` with the current time; marking
    /// as unwatched clears it.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        video_id: DbId,
        watched: bool,
    ) -> Result<VideoProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO video_progress (user_id, video_id, watched, watched_at)
             VALUES ($1, $2, $3, CASE WHEN $3 THEN NOW() END)
             ON CONFLICT ON CONSTRAINT uq_video_progress_user_video DO UPDATE SET
                watched = EXCLUDED.watched,
                watched_at = EXCLUDED.watched_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoProgress>(&query)
            .bind(user_id)
            .bind(video_id)
            .bind(watched)
            .fetch_one(pool)
            .await
    }
}
