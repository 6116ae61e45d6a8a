//! Per-user watched state of a video.

use academy_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Watched state as returned to the client.
///
/// Videos the user never touched are reported with `watched: false` rather
/// than as missing.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct VideoProgress {
    pub video_id: DbId,
    pub watched: bool,
    pub watched_at: Option<Timestamp>,
}

impl VideoProgress {
    pub fn unwatched(video_id: DbId) -> Self {
        Self {
            video_id,
            watched: false,
            watched_at: None,
        }
    }
}
