//! YouTube Data API v3 client.
//!
//! Covers the two read endpoints the academy needs: paging through a
//! playlist's items and looking up canonical video metadata by id.

pub mod api;
pub mod models;

pub use api::{YouTubeApi, YouTubeError, DEFAULT_API_URL, MAX_IDS_PER_REQUEST, MAX_PAGE_SIZE};
