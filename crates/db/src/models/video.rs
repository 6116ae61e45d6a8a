//! Video entity model and DTOs.

use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub youtube_id: String,
    pub title: String,
    pub description: Option<String>,
    pub sector_id: DbId,
    /// When the video was published on YouTube (not when it was added to a playlist).
    pub published_at: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for inserting a video, either from a sync run or a manual admin add.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateVideo {
    pub youtube_id: String,
    pub title: String,
    pub description: Option<String>,
    pub sector_id: DbId,
    pub published_at: Option<Timestamp>,
    pub created_by: Option<DbId>,
}

/// A stored video whose `published_at` is still unknown.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MissingPublishDate {
    pub id: DbId,
    pub youtube_id: String,
}

/// DTO for an admin edit of a video. Every field is replaced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateVideo {
    pub youtube_id: String,
    pub title: String,
    pub description: Option<String>,
    pub sector_id: DbId,
}
