//! The external video platform seam.

use std::collections::HashMap;

use academy_core::types::Timestamp;
use academy_youtube::{YouTubeApi, YouTubeError};
use async_trait::async_trait;

/// One video reference from a playlist listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    pub video_id: String,
    pub title: String,
    pub description: String,
    /// When the video was added to the playlist. Not a publish date.
    pub added_at: Option<Timestamp>,
}

/// One page of a playlist listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistPage {
    pub entries: Vec<PlaylistEntry>,
    /// Continuation token; `None` on the last page.
    pub next_page_token: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The platform answered with a non-success HTTP status.
    #[error("video platform responded with status {status}")]
    Status { status: u16 },

    /// The request could not be completed or its response decoded.
    #[error("video platform request failed: {0}")]
    Request(String),
}

impl PlatformError {
    /// Short caller-facing reason, e.g. `"404"` or `"request failed"`.
    pub fn short_reason(&self) -> String {
        match self {
            Self::Status { status } => status.to_string(),
            Self::Request(_) => "request failed".to_string(),
        }
    }
}

/// Read access to an external video platform.
///
/// Listing pages are fetched at the platform's maximum page size.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Fetch one page of `playlist_id`, continuing from `page_token` if given.
    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, PlatformError>;

    /// Look up authoritative publish timestamps for up to
    /// [`crate::LOOKUP_BATCH_SIZE`] video ids. Unknown ids are absent from
    /// the returned map.
    async fn publish_dates(
        &self,
        video_ids: &[String],
    ) -> Result<HashMap<String, Timestamp>, PlatformError>;
}

impl From<YouTubeError> for PlatformError {
    fn from(err: YouTubeError) -> Self {
        match err {
            YouTubeError::ApiError { status, body } => {
                tracing::warn!(status, body = %body, "YouTube API returned an error response");
                Self::Status { status }
            }
            other => Self::Request(other.to_string()),
        }
    }
}

#[async_trait]
impl VideoPlatform for YouTubeApi {
    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, PlatformError> {
        let response = self.list_playlist_items(playlist_id, page_token).await?;

        let entries = response
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.video_id()?.to_string();
                Some(PlaylistEntry {
                    video_id,
                    title: item.snippet.title,
                    description: item.snippet.description,
                    added_at: item.snippet.published_at,
                })
            })
            .collect();

        Ok(PlaylistPage {
            entries,
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn publish_dates(
        &self,
        video_ids: &[String],
    ) -> Result<HashMap<String, Timestamp>, PlatformError> {
        let response = self.list_videos(video_ids).await?;
        Ok(response
            .items
            .into_iter()
            .filter_map(|video| video.published_at().map(|at| (video.id, at)))
            .collect())
    }
}
