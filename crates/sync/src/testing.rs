//! In-memory fakes of [`SyncStore`] and [`VideoPlatform`] for tests.
//!
//! These let the engine and the HTTP layer be exercised without PostgreSQL
//! or network access. Both fakes count the calls made against them so tests
//! can assert that nothing was touched.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use academy_core::types::{DbId, Timestamp};
use academy_db::models::playlist_mapping::PlaylistMapping;
use academy_db::models::video::{CreateVideo, MissingPublishDate, Video};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::platform::{PlatformError, PlaylistEntry, PlaylistPage, VideoPlatform};
use crate::store::{InsertOutcome, SyncStore};

/// Build a playlist entry with an empty description and no playlist date.
pub fn entry(video_id: &str, title: &str) -> PlaylistEntry {
    PlaylistEntry {
        video_id: video_id.to_string(),
        title: title.to_string(),
        description: String::new(),
        added_at: None,
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct StoreState {
    mappings: Vec<PlaylistMapping>,
    videos: Vec<Video>,
    race_on_insert: HashSet<String>,
    fail_insert: HashSet<String>,
    fail_known_id_reads: bool,
}

/// [`SyncStore`] holding mappings and videos in memory.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    calls: AtomicUsize,
    known_id_reads: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mapping(
        &self,
        playlist_id: &str,
        playlist_name: Option<&str>,
        sector_id: DbId,
    ) -> PlaylistMapping {
        let mapping = PlaylistMapping {
            id: Uuid::new_v4(),
            playlist_id: playlist_id.to_string(),
            playlist_name: playlist_name.map(str::to_string),
            sector_id,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().mappings.push(mapping.clone());
        mapping
    }

    /// Seed a stored video and return its id.
    pub fn add_video(
        &self,
        youtube_id: &str,
        sector_id: DbId,
        published_at: Option<Timestamp>,
    ) -> DbId {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().videos.push(Video {
            id,
            youtube_id: youtube_id.to_string(),
            title: youtube_id.to_string(),
            description: None,
            sector_id,
            published_at,
            created_by: None,
            created_at: Utc::now(),
        });
        id
    }

    /// Make inserts of `youtube_id` report a uniqueness conflict, as if a
    /// concurrent run had stored it first.
    pub fn race_on_insert(&self, youtube_id: &str) {
        self.state
            .lock()
            .unwrap()
            .race_on_insert
            .insert(youtube_id.to_string());
    }

    /// Make inserts of `youtube_id` fail with a non-uniqueness error.
    pub fn fail_insert(&self, youtube_id: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_insert
            .insert(youtube_id.to_string());
    }

    pub fn fail_known_id_reads(&self) {
        self.state.lock().unwrap().fail_known_id_reads = true;
    }

    pub fn videos(&self) -> Vec<Video> {
        self.state.lock().unwrap().videos.clone()
    }

    pub fn video(&self, id: DbId) -> Option<Video> {
        self.videos().into_iter().find(|v| v.id == id)
    }

    /// Total number of [`SyncStore`] calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn known_id_reads(&self) -> usize {
        self.known_id_reads.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SyncStore for InMemoryStore {
    async fn playlist_mappings(&self) -> Result<Vec<PlaylistMapping>, sqlx::Error> {
        self.record_call();
        Ok(self.state.lock().unwrap().mappings.clone())
    }

    async fn known_video_ids(&self) -> Result<HashSet<String>, sqlx::Error> {
        self.record_call();
        self.known_id_reads.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        if state.fail_known_id_reads {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(state.videos.iter().map(|v| v.youtube_id.clone()).collect())
    }

    async fn insert_video(&self, video: &CreateVideo) -> Result<InsertOutcome, sqlx::Error> {
        self.record_call();
        let mut state = self.state.lock().unwrap();
        if state.fail_insert.contains(&video.youtube_id) {
            return Err(sqlx::Error::Protocol("simulated insert failure".into()));
        }
        if state.race_on_insert.contains(&video.youtube_id)
            || state.videos.iter().any(|v| v.youtube_id == video.youtube_id)
        {
            return Ok(InsertOutcome::AlreadyExists);
        }

        state.videos.push(Video {
            id: Uuid::new_v4(),
            youtube_id: video.youtube_id.clone(),
            title: video.title.clone(),
            description: video.description.clone(),
            sector_id: video.sector_id,
            published_at: video.published_at,
            created_by: video.created_by,
            created_at: Utc::now(),
        });
        Ok(InsertOutcome::Inserted)
    }

    async fn videos_missing_publish_date(&self) -> Result<Vec<MissingPublishDate>, sqlx::Error> {
        self.record_call();
        Ok(self
            .state
            .lock()
            .unwrap()
            .videos
            .iter()
            .filter(|v| v.published_at.is_none())
            .map(|v| MissingPublishDate {
                id: v.id,
                youtube_id: v.youtube_id.clone(),
            })
            .collect())
    }

    async fn set_publish_date(
        &self,
        id: DbId,
        published_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        self.record_call();
        let mut state = self.state.lock().unwrap();
        match state
            .videos
            .iter_mut()
            .find(|v| v.id == id && v.published_at.is_none())
        {
            Some(video) => {
                video.published_at = Some(published_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// One scripted response of a playlist listing.
#[derive(Debug, Clone)]
pub enum ScriptedPage {
    Entries(Vec<PlaylistEntry>),
    /// Respond with these entries and a continuation token that leads back
    /// to this same page, forever.
    Repeating(Vec<PlaylistEntry>),
    /// Respond with this non-success HTTP status.
    Status(u16),
}

/// [`VideoPlatform`] that replays scripted playlist pages.
///
/// Page `n` of a playlist is reached with the token `"page-n"`; a token is
/// handed out whenever another scripted page follows.
#[derive(Default)]
pub struct ScriptedPlatform {
    playlists: HashMap<String, Vec<ScriptedPage>>,
    publish_dates: HashMap<String, Timestamp>,
    fail_lookups_from: Option<usize>,
    page_calls: AtomicUsize,
    lookup_batches: Mutex<Vec<usize>>,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playlist(mut self, playlist_id: &str, pages: Vec<ScriptedPage>) -> Self {
        self.playlists.insert(playlist_id.to_string(), pages);
        self
    }

    pub fn publish_date(mut self, video_id: &str, at: Timestamp) -> Self {
        self.publish_dates.insert(video_id.to_string(), at);
        self
    }

    /// Fail every publish-date lookup from the `index`-th call on (0-based).
    pub fn fail_lookup_batches_from(mut self, index: usize) -> Self {
        self.fail_lookups_from = Some(index);
        self
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup_batches.lock().unwrap().len()
    }

    /// Number of ids sent in each lookup call, in call order.
    pub fn lookup_batch_sizes(&self) -> Vec<usize> {
        self.lookup_batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoPlatform for ScriptedPlatform {
    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, PlatformError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);

        let pages = self
            .playlists
            .get(playlist_id)
            .ok_or(PlatformError::Status { status: 404 })?;
        let index = match page_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| PlatformError::Request(format!("bad page token {token}")))?,
        };

        match pages.get(index) {
            Some(ScriptedPage::Entries(entries)) => Ok(PlaylistPage {
                entries: entries.clone(),
                next_page_token: (index + 1 < pages.len()).then(|| format!("page-{}", index + 1)),
            }),
            Some(ScriptedPage::Repeating(entries)) => Ok(PlaylistPage {
                entries: entries.clone(),
                next_page_token: Some(format!("page-{index}")),
            }),
            Some(ScriptedPage::Status(status)) => Err(PlatformError::Status { status: *status }),
            None => Err(PlatformError::Status { status: 400 }),
        }
    }

    async fn publish_dates(
        &self,
        video_ids: &[String],
    ) -> Result<HashMap<String, Timestamp>, PlatformError> {
        let call_index = {
            let mut batches = self.lookup_batches.lock().unwrap();
            batches.push(video_ids.len());
            batches.len() - 1
        };

        if self.fail_lookups_from.is_some_and(|from| call_index >= from) {
            return Err(PlatformError::Status { status: 500 });
        }

        Ok(video_ids
            .iter()
            .filter_map(|id| self.publish_dates.get(id).map(|at| (id.clone(), *at)))
            .collect())
    }
}
