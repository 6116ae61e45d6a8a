//! YouTube playlist mapping model and DTOs.

use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `youtube_playlist_mappings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaylistMapping {
    pub id: DbId,
    /// External YouTube playlist id (`PL...`).
    pub playlist_id: String,
    /// Optional admin-facing label shown in sync error messages.
    pub playlist_name: Option<String>,
    pub sector_id: DbId,
    pub created_at: Timestamp,
}

impl PlaylistMapping {
    /// Label used when reporting problems with this playlist.
    pub fn label(&self) -> &str {
        self.playlist_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.playlist_id)
    }
}

/// DTO for creating a new playlist mapping.
#[derive(Debug, Deserialize)]
pub struct CreatePlaylistMapping {
    pub playlist_id: String,
    pub playlist_name: Option<String>,
    pub sector_id: DbId,
}
