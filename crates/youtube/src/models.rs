//! Response payloads for the `playlistItems` and `videos` endpoints.
//!
//! Only the fields the academy reads are modelled; everything else in the
//! API response is ignored by serde.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /playlistItems` response page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    /// Continuation token; absent on the last page.
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// When the item was added to the playlist, NOT when the video was published.
    pub published_at: Option<DateTime<Utc>>,
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: Option<String>,
}

impl PlaylistItem {
    /// The referenced video id, if the item points at a video.
    pub fn video_id(&self) -> Option<&str> {
        self.snippet
            .resource_id
            .as_ref()
            .and_then(|r| r.video_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// `GET /videos` response.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoResource {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    /// When the video itself was published on YouTube.
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: String,
}

impl VideoResource {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.snippet.as_ref().and_then(|s| s.published_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_playlist_page() {
        let json = r#"{
            "kind": "youtube#playlistItemListResponse",
            "nextPageToken": "CDIQAA",
            "pageInfo": { "totalResults": 120, "resultsPerPage": 50 },
            "items": [
                {
                    "kind": "youtube#playlistItem",
                    "snippet": {
                        "publishedAt": "2025-03-02T09:30:00Z",
                        "title": "Phone sales basics",
                        "description": "",
                        "resourceId": { "kind": "youtube#video", "videoId": "abcdefghijk" }
                    }
                },
                {
                    "kind": "youtube#playlistItem",
                    "snippet": { "title": "Deleted video", "resourceId": { "kind": "youtube#video" } }
                }
            ]
        }"#;

        let page: PlaylistItemListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("CDIQAA"));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].video_id(), Some("abcdefghijk"));
        assert_eq!(
            page.items[0].snippet.published_at,
            Some(Utc.with_ymd_and_hms(2025, 3, 2, 9, 30, 0).unwrap())
        );
        assert_eq!(page.items[1].video_id(), None);
    }

    #[test]
    fn last_page_has_no_token_and_may_omit_items() {
        let page: PlaylistItemListResponse =
            serde_json::from_str(r#"{ "kind": "youtube#playlistItemListResponse" }"#).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn parses_video_list() {
        let json = r#"{
            "items": [
                { "id": "abcdefghijk", "snippet": { "publishedAt": "2021-11-05T14:00:00Z", "title": "Phone sales basics" } },
                { "id": "lmnopqrstuv" }
            ]
        }"#;

        let list: VideoListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            list.items[0].published_at(),
            Some(Utc.with_ymd_and_hms(2021, 11, 5, 14, 0, 0).unwrap())
        );
        assert_eq!(list.items[1].published_at(), None);
    }
}
