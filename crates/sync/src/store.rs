//! The relational store seam and its PostgreSQL implementation.

use std::collections::HashSet;

use academy_core::types::{DbId, Timestamp};
use academy_db::models::playlist_mapping::PlaylistMapping;
use academy_db::models::video::{CreateVideo, MissingPublishDate};
use academy_db::repositories::{PlaylistMappingRepo, VideoRepo};
use academy_db::DbPool;
use async_trait::async_trait;

/// Result of a single video insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The store already holds this `youtube_id` (unique constraint hit).
    AlreadyExists,
}

/// Store operations the sync job depends on.
#[async_trait]
pub trait SyncStore: Send + Sync {
    async fn playlist_mappings(&self) -> Result<Vec<PlaylistMapping>, sqlx::Error>;

    /// Every `youtube_id` currently stored.
    async fn known_video_ids(&self) -> Result<HashSet<String>, sqlx::Error>;

    /// Insert a video. A uniqueness violation is reported as
    /// [`InsertOutcome::AlreadyExists`], not as an error.
    async fn insert_video(&self, video: &CreateVideo) -> Result<InsertOutcome, sqlx::Error>;

    async fn videos_missing_publish_date(&self) -> Result<Vec<MissingPublishDate>, sqlx::Error>;

    /// Set the publish date of a video that has none. Returns `false` if the
    /// video is gone or already has a date.
    async fn set_publish_date(&self, id: DbId, published_at: Timestamp)
        -> Result<bool, sqlx::Error>;
}

/// [`SyncStore`] backed by the PostgreSQL repositories.
#[derive(Debug, Clone)]
pub struct PgSyncStore {
    pool: DbPool,
}

impl PgSyncStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SyncStore for PgSyncStore {
    async fn playlist_mappings(&self) -> Result<Vec<PlaylistMapping>, sqlx::Error> {
        PlaylistMappingRepo::list(&self.pool).await
    }

    async fn known_video_ids(&self) -> Result<HashSet<String>, sqlx::Error> {
        Ok(VideoRepo::list_youtube_ids(&self.pool)
            .await?
            .into_iter()
            .collect())
    }

    async fn insert_video(&self, video: &CreateVideo) -> Result<InsertOutcome, sqlx::Error> {
        match VideoRepo::create(&self.pool, video).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) if academy_db::is_unique_violation(&err) => Ok(InsertOutcome::AlreadyExists),
            Err(err) => Err(err),
        }
    }

    async fn videos_missing_publish_date(&self) -> Result<Vec<MissingPublishDate>, sqlx::Error> {
        VideoRepo::list_missing_published_at(&self.pool).await
    }

    async fn set_publish_date(
        &self,
        id: DbId,
        published_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        VideoRepo::set_published_at(&self.pool, id, published_at).await
    }
}
