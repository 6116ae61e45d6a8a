//! REST client for the YouTube Data API v3.
//!
//! Every request carries the server-held API key as the `key` query
//! parameter. The key never appears in errors: transport failures are
//! stripped of their URL before they leave this module.

use serde::de::DeserializeOwned;

use crate::models::{PlaylistItemListResponse, VideoListResponse};

/// Production base URL of the Data API.
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Largest `maxResults` the `playlistItems` endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Largest number of comma-separated ids the `videos` endpoint accepts.
pub const MAX_IDS_PER_REQUEST: usize = 50;

/// HTTP client for the YouTube Data API.
#[derive(Clone)]
pub struct YouTubeApi {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// Errors from the YouTube REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum YouTubeError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// YouTube returned a non-2xx status code.
    #[error("YouTube API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// More ids were passed to a batched lookup than the API allows.
    #[error("Too many ids in one request: {0} (max {MAX_IDS_PER_REQUEST})")]
    TooManyIds(usize),
}

impl From<reqwest::Error> for YouTubeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.without_url())
    }
}

impl std::fmt::Debug for YouTubeApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeApi")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl YouTubeApi {
    /// Create a client against `api_url` (normally [`DEFAULT_API_URL`]).
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, api_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Fetch one page of a playlist's items.
    ///
    /// Sends `GET /playlistItems?part=snippet&playlistId=..&maxResults=50`,
    /// plus `pageToken` when continuing from a previous page.
    pub async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemListResponse, YouTubeError> {
        let max_results = MAX_PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        tracing::debug!(playlist_id, page_token, "Fetching YouTube playlist page");
        let response = self
            .client
            .get(format!("{}/playlistItems", self.api_url))
            .query(&query)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Look up canonical video resources by id (at most
    /// [`MAX_IDS_PER_REQUEST`] ids per call).
    ///
    /// Ids YouTube does not know (deleted, private) are simply absent from
    /// the returned items.
    pub async fn list_videos(&self, video_ids: &[String]) -> Result<VideoListResponse, YouTubeError> {
        if video_ids.len() > MAX_IDS_PER_REQUEST {
            return Err(YouTubeError::TooManyIds(video_ids.len()));
        }

        let ids = video_ids.join(",");
        let max_results = MAX_PAGE_SIZE.to_string();
        tracing::debug!(count = video_ids.len(), "Fetching YouTube video metadata");
        let response = self
            .client
            .get(format!("{}/videos", self.api_url))
            .query(&[
                ("part", "snippet"),
                ("id", ids.as_str()),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, capturing the body
    /// text for diagnostics otherwise.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, YouTubeError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(YouTubeError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, YouTubeError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
