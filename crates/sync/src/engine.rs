//! Playlist synchronization and publish-date backfill.
//!
//! A sync run is strictly sequential: mappings one after another, pages of
//! a playlist one after another (continuation tokens are serial anyway).
//! The set of known YouTube ids is loaded once, owned by the run, and
//! threaded by `&mut` through every playlist and page so an id seen twice
//! in the same run is inserted at most once.
//!
//! Failures are localized. A failing playlist listing stops that playlist
//! only; a failing insert skips that video only. Both end up as short
//! strings in [`SyncSummary::errors`] while the details go to the log.
//! Nothing is retried; the next run is the retry.

use std::collections::{HashMap, HashSet};

use academy_core::types::{DbId, Timestamp};
use academy_db::models::playlist_mapping::PlaylistMapping;
use academy_db::models::video::CreateVideo;
use academy_youtube::MAX_IDS_PER_REQUEST;

use crate::outcome::{BackfillSummary, SyncOutcome, SyncSummary};
use crate::platform::{PlaylistEntry, VideoPlatform};
use crate::store::{InsertOutcome, SyncStore};

/// Maximum number of ids sent in one publish-date lookup.
pub const LOOKUP_BATCH_SIZE: usize = MAX_IDS_PER_REQUEST;

/// Failures that abort a whole run. No partial result is returned.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to load playlist mappings: {0}")]
    LoadMappings(#[source] sqlx::Error),

    #[error("failed to load existing video ids: {0}")]
    LoadKnownIds(#[source] sqlx::Error),

    #[error("failed to load videos missing a publish date: {0}")]
    LoadMissingDates(#[source] sqlx::Error),
}

/// Runs sync and backfill passes against a store and a video platform.
pub struct SyncEngine<'a> {
    store: &'a dyn SyncStore,
    platform: &'a dyn VideoPlatform,
}

impl<'a> SyncEngine<'a> {
    pub fn new(store: &'a dyn SyncStore, platform: &'a dyn VideoPlatform) -> Self {
        Self { store, platform }
    }

    /// Pull every mapped playlist into the store.
    ///
    /// `created_by` is recorded on every inserted video.
    pub async fn sync_playlists(&self, created_by: DbId) -> Result<SyncSummary, SyncError> {
        let mappings = self
            .store
            .playlist_mappings()
            .await
            .map_err(SyncError::LoadMappings)?;

        if mappings.is_empty() {
            tracing::info!("No playlist mappings configured, nothing to sync");
            return Ok(SyncSummary::no_mappings());
        }
        tracing::info!(mappings = mappings.len(), "Starting playlist sync");

        let mut known = self
            .store
            .known_video_ids()
            .await
            .map_err(SyncError::LoadKnownIds)?;
        tracing::info!(existing = known.len(), "Loaded existing video ids");

        let mut total = SyncOutcome::default();
        for mapping in &mappings {
            let outcome = self.sync_mapping(mapping, created_by, &mut known).await;
            total.merge(outcome);
        }

        tracing::info!(
            synced = total.synced,
            skipped = total.skipped,
            errors = total.errors.len(),
            "Playlist sync complete"
        );
        Ok(total.into_summary())
    }

    /// Fill in `published_at` for stored videos that lack it.
    ///
    /// Only videos whose publish date is currently unknown are touched.
    pub async fn backfill_publish_dates(&self) -> Result<BackfillSummary, SyncError> {
        let pending = self
            .store
            .videos_missing_publish_date()
            .await
            .map_err(SyncError::LoadMissingDates)?;
        tracing::info!(pending = pending.len(), "Starting publish date backfill");

        if pending.is_empty() {
            return Ok(BackfillSummary::new(0));
        }

        let ids: Vec<String> = pending.iter().map(|v| v.youtube_id.clone()).collect();
        let dates = self.lookup_publish_dates(&ids).await;

        let mut updated = 0;
        for video in &pending {
            let Some(published_at) = dates.get(&video.youtube_id) else {
                continue;
            };
            match self.store.set_publish_date(video.id, *published_at).await {
                Ok(true) => updated += 1,
                Ok(false) => {
                    tracing::debug!(video_id = %video.id, "Publish date already set, skipping");
                }
                Err(err) => {
                    tracing::warn!(
                        video_id = %video.id,
                        youtube_id = %video.youtube_id,
                        error = %err,
                        "Failed to update publish date"
                    );
                }
            }
        }

        tracing::info!(updated, "Publish date backfill complete");
        Ok(BackfillSummary::new(updated))
    }

    /// Page through one playlist until the continuation token runs out, a
    /// listing call fails, or a token comes back that was already followed.
    async fn sync_mapping(
        &self,
        mapping: &PlaylistMapping,
        created_by: DbId,
        known: &mut HashSet<String>,
    ) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();
        let mut page_number = 0u32;

        loop {
            page_number += 1;
            let page = match self
                .platform
                .playlist_page(&mapping.playlist_id, page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(err) => {
                    tracing::error!(
                        playlist_id = %mapping.playlist_id,
                        page = page_number,
                        error = %err,
                        "Failed to list playlist items"
                    );
                    outcome
                        .errors
                        .push(format!("Playlist {}: {}", mapping.label(), err.short_reason()));
                    break;
                }
            };

            tracing::debug!(
                playlist_id = %mapping.playlist_id,
                page = page_number,
                items = page.entries.len(),
                "Received playlist page"
            );
            let page_outcome = self
                .sync_page(mapping, created_by, page.entries, known)
                .await;
            outcome.merge(page_outcome);

            match page.next_page_token {
                Some(token) if !seen_tokens.insert(token.clone()) => {
                    tracing::error!(
                        playlist_id = %mapping.playlist_id,
                        page = page_number,
                        token = %token,
                        "Playlist returned an already visited page token"
                    );
                    outcome
                        .errors
                        .push(format!("Playlist {}: repeated page token", mapping.label()));
                    break;
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        outcome
    }

    /// Insert the new entries of one page.
    async fn sync_page(
        &self,
        mapping: &PlaylistMapping,
        created_by: DbId,
        entries: Vec<PlaylistEntry>,
        known: &mut HashSet<String>,
    ) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        let mut on_page = HashSet::new();
        let mut fresh = Vec::new();
        for entry in entries {
            if known.contains(&entry.video_id) || !on_page.insert(entry.video_id.clone()) {
                outcome.skipped += 1;
                continue;
            }
            fresh.push(entry);
        }

        if fresh.is_empty() {
            return outcome;
        }

        let ids: Vec<String> = fresh.iter().map(|e| e.video_id.clone()).collect();
        let dates = self.lookup_publish_dates(&ids).await;

        for entry in fresh {
            let video = CreateVideo {
                published_at: dates.get(&entry.video_id).copied(),
                description: Some(entry.description).filter(|d| !d.trim().is_empty()),
                youtube_id: entry.video_id,
                title: entry.title,
                sector_id: mapping.sector_id,
                created_by: Some(created_by),
            };

            match self.store.insert_video(&video).await {
                Ok(InsertOutcome::Inserted) => {
                    tracing::debug!(youtube_id = %video.youtube_id, title = %video.title, "Synced video");
                    outcome.synced += 1;
                    known.insert(video.youtube_id);
                }
                Ok(InsertOutcome::AlreadyExists) => {
                    tracing::debug!(youtube_id = %video.youtube_id, "Video inserted concurrently, skipping");
                    outcome.skipped += 1;
                    known.insert(video.youtube_id);
                }
                Err(err) => {
                    tracing::error!(
                        youtube_id = %video.youtube_id,
                        playlist_id = %mapping.playlist_id,
                        error = %err,
                        "Failed to insert video"
                    );
                    outcome
                        .errors
                        .push(format!("Video {}: could not be saved", video.title));
                }
            }
        }

        outcome
    }

    /// Resolve publish dates in batches of [`LOOKUP_BATCH_SIZE`].
    ///
    /// A failed batch is logged and contributes no dates; the affected
    /// videos are stored with an unknown publish date.
    async fn lookup_publish_dates(&self, ids: &[String]) -> HashMap<String, Timestamp> {
        let mut dates = HashMap::with_capacity(ids.len());
        for chunk in ids.chunks(LOOKUP_BATCH_SIZE) {
            match self.platform.publish_dates(chunk).await {
                Ok(found) => dates.extend(found),
                Err(err) => {
                    tracing::warn!(
                        batch = chunk.len(),
                        error = %err,
                        "Publish date lookup failed, dates left empty"
                    );
                }
            }
        }
        dates
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::testing::{entry, InMemoryStore, ScriptedPlatform, ScriptedPage};

    fn ts(year: i32, month: u32, day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn admin() -> DbId {
        Uuid::new_v4()
    }

    #[tokio::test]
    async fn two_playlists_with_one_known_video() {
        let sales = Uuid::new_v4();
        let stock = Uuid::new_v4();
        let store = InMemoryStore::new();
        store.add_mapping("PLsales00001", Some("Sales"), sales);
        store.add_mapping("PLstock00001", Some("Stock"), stock);

        let platform = ScriptedPlatform::new()
            .playlist(
                "PLsales00001",
                vec![ScriptedPage::Entries(vec![
                    entry("sales000001", "Cold calls"),
                    entry("sales000002", "Objections"),
                    entry("sales000003", "Closing"),
                ])],
            )
            .playlist(
                "PLstock00001",
                vec![ScriptedPage::Entries(vec![
                    entry("sales000002", "Objections (again)"),
                    entry("stock000001", "Inventory counts"),
                ])],
            );

        let summary = SyncEngine::new(&store, &platform)
            .sync_playlists(admin())
            .await
            .unwrap();

        assert_eq!(summary.synced, 4);
        assert_eq!(summary.skipped, 1);
        assert!(summary.errors.is_empty());

        let videos = store.videos();
        assert_eq!(videos.len(), 4);
        assert_eq!(videos.iter().filter(|v| v.sector_id == sales).count(), 3);
        let stock_videos: Vec<_> = videos.iter().filter(|v| v.sector_id == stock).collect();
        assert_eq!(stock_videos.len(), 1);
        assert_eq!(stock_videos[0].youtube_id, "stock000001");
    }

    #[tokio::test]
    async fn rerun_skips_everything_already_stored() {
        let sector = Uuid::new_v4();
        let store = InMemoryStore::new();
        store.add_mapping("PLsales00001", None, sector);
        store.add_video("sales000001", sector, None);
        store.add_video("sales000002", sector, None);

        let platform = ScriptedPlatform::new().playlist(
            "PLsales00001",
            vec![ScriptedPage::Entries(vec![
                entry("sales000001", "Cold calls"),
                entry("sales000002", "Objections"),
            ])],
        );

        let summary = SyncEngine::new(&store, &platform)
            .sync_playlists(admin())
            .await
            .unwrap();

        assert_eq!(summary.synced, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.message, "No new videos found.");
        assert_eq!(store.videos().len(), 2);
        assert_eq!(platform.lookup_calls(), 0, "no lookups for known videos");
    }

    #[tokio::test]
    async fn publish_date_comes_from_video_lookup_not_playlist() {
        let sector = Uuid::new_v4();
        let store = InMemoryStore::new();
        store.add_mapping("PLsales00001", None, sector);

        let mut listed = entry("sales000001", "Cold calls");
        listed.added_at = Some(ts(2025, 5, 1));
        let platform = ScriptedPlatform::new()
            .playlist("PLsales00001", vec![ScriptedPage::Entries(vec![
                listed,
                entry("sales000002", "Unlisted since"),
            ])])
            .publish_date("sales000001", ts(2019, 2, 14));

        SyncEngine::new(&store, &platform)
            .sync_playlists(admin())
            .await
            .unwrap();

        let videos = store.videos();
        let cold_calls = videos.iter().find(|v| v.youtube_id == "sales000001").unwrap();
        assert_eq!(cold_calls.published_at, Some(ts(2019, 2, 14)));
        let unlisted = videos.iter().find(|v| v.youtube_id == "sales000002").unwrap();
        assert_eq!(unlisted.published_at, None);
    }

    #[tokio::test]
    async fn no_mappings_means_no_external_calls() {
        let store = InMemoryStore::new();
        let platform = ScriptedPlatform::new();

        let summary = SyncEngine::new(&store, &platform)
            .sync_playlists(admin())
            .await
            .unwrap();

        assert_eq!(summary, SyncSummary::no_mappings());
        assert_eq!(platform.page_calls(), 0);
        assert_eq!(platform.lookup_calls(), 0);
        assert_eq!(store.known_id_reads(), 0);
    }

    #[tokio::test]
    async fn failing_page_keeps_earlier_pages_and_other_playlists() {
        let sales = Uuid::new_v4();
        let stock = Uuid::new_v4();
        let store = InMemoryStore::new();
        store.add_mapping("PLsales00001", Some("Sales"), sales);
        store.add_mapping("PLstock00001", None, stock);

        let platform = ScriptedPlatform::new()
            .playlist(
                "PLsales00001",
                vec![
                    ScriptedPage::Entries(vec![
                        entry("sales000001", "Cold calls"),
                        entry("sales000002", "Objections"),
                    ]),
                    ScriptedPage::Status(503),
                    ScriptedPage::Entries(vec![entry("sales000003", "Never fetched")]),
                ],
            )
            .playlist(
                "PLstock00001",
                vec![ScriptedPage::Entries(vec![entry("stock000001", "Inventory")])],
            );

        let summary = SyncEngine::new(&store, &platform)
            .sync_playlists(admin())
            .await
            .unwrap();

        assert_eq!(summary.synced, 3);
        assert_eq!(summary.errors, vec!["Playlist Sales: 503"]);
        let ids: Vec<String> = store.videos().into_iter().map(|v| v.youtube_id).collect();
        assert!(ids.contains(&"sales000001".to_string()));
        assert!(ids.contains(&"sales000002".to_string()));
        assert!(ids.contains(&"stock000001".to_string()));
        assert!(!ids.contains(&"sales000003".to_string()));
    }

    #[tokio::test]
    async fn repeated_page_token_stops_the_playlist() {
        let sector = Uuid::new_v4();
        let store = InMemoryStore::new();
        store.add_mapping("PLloop000001", Some("Looping"), sector);
        store.add_mapping("PLstock00001", None, sector);

        let platform = ScriptedPlatform::new()
            .playlist(
                "PLloop000001",
                vec![ScriptedPage::Repeating(vec![entry("loop0000001", "Again")])],
            )
            .playlist(
                "PLstock00001",
                vec![ScriptedPage::Entries(vec![entry("stock000001", "Inventory")])],
            );

        let summary = SyncEngine::new(&store, &platform)
            .sync_playlists(admin())
            .await
            .unwrap();

        // First page, the page behind the token, then the second playlist.
        assert_eq!(platform.page_calls(), 3);
        assert_eq!(summary.synced, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, vec!["Playlist Looping: repeated page token"]);
    }

    #[tokio::test]
    async fn follows_continuation_tokens_and_dedupes_across_pages() {
        let sector = Uuid::new_v4();
        let store = InMemoryStore::new();
        store.add_mapping("PLsales00001", None, sector);

        let platform = ScriptedPlatform::new().playlist(
            "PLsales00001",
            vec![
                ScriptedPage::Entries(vec![
                    entry("sales000001", "Cold calls"),
                    entry("sales000001", "Cold calls (dup on page)"),
                ]),
                ScriptedPage::Entries(vec![
                    entry("sales000001", "Cold calls (dup on next page)"),
                    entry("sales000002", "Objections"),
                ]),
            ],
        );

        let summary = SyncEngine::new(&store, &platform)
            .sync_playlists(admin())
            .await
            .unwrap();

        assert_eq!(platform.page_calls(), 2);
        assert_eq!(summary.synced, 2);
        assert_eq!(summary.skipped, 2);
        assert_eq!(store.videos().len(), 2);
    }

    #[tokio::test]
    async fn unique_violation_counts_as_skip_and_other_failures_as_errors() {
        let sector = Uuid::new_v4();
        let store = InMemoryStore::new();
        store.add_mapping("PLsales00001", None, sector);
        store.race_on_insert("sales000001");
        store.fail_insert("sales000002");

        let platform = ScriptedPlatform::new().playlist(
            "PLsales00001",
            vec![ScriptedPage::Entries(vec![
                entry("sales000001", "Raced"),
                entry("sales000002", "Broken"),
                entry("sales000003", "Fine"),
            ])],
        );

        let summary = SyncEngine::new(&store, &platform)
            .sync_playlists(admin())
            .await
            .unwrap();

        assert_eq!(summary.synced, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, vec!["Video Broken: could not be saved"]);
    }

    #[tokio::test]
    async fn lookups_are_chunked_and_failed_chunks_leave_dates_empty() {
        let sector = Uuid::new_v4();
        let store = InMemoryStore::new();
        store.add_mapping("PLbig0000001", None, sector);

        let entries: Vec<_> = (0..LOOKUP_BATCH_SIZE + 5)
            .map(|i| entry(&format!("vid{i:08}"), "Bulk"))
            .collect();
        let platform = ScriptedPlatform::new()
            .playlist("PLbig0000001", vec![ScriptedPage::Entries(entries)])
            .publish_date("vid00000000", ts(2020, 1, 1))
            .fail_lookup_batches_from(1);

        let summary = SyncEngine::new(&store, &platform)
            .sync_playlists(admin())
            .await
            .unwrap();

        assert_eq!(summary.synced as usize, LOOKUP_BATCH_SIZE + 5);
        assert_eq!(platform.lookup_batch_sizes(), vec![LOOKUP_BATCH_SIZE, 5]);
        let videos = store.videos();
        assert_eq!(videos.iter().filter(|v| v.published_at.is_some()).count(), 1);
    }

    #[tokio::test]
    async fn store_failure_on_load_aborts_run() {
        let store = InMemoryStore::new();
        store.add_mapping("PLsales00001", None, Uuid::new_v4());
        store.fail_known_id_reads();
        let platform = ScriptedPlatform::new();

        let result = SyncEngine::new(&store, &platform).sync_playlists(admin()).await;

        assert_matches!(result, Err(SyncError::LoadKnownIds(_)));
        assert_eq!(platform.page_calls(), 0);
    }

    #[tokio::test]
    async fn backfill_only_fills_missing_dates() {
        let sector = Uuid::new_v4();
        let store = InMemoryStore::new();
        let dated = store.add_video("dated000001", sector, Some(ts(2018, 3, 3)));
        let missing = store.add_video("missing0001", sector, None);
        let unknown = store.add_video("missing0002", sector, None);

        let platform = ScriptedPlatform::new()
            .publish_date("dated000001", ts(2024, 1, 1))
            .publish_date("missing0001", ts(2021, 7, 7));

        let summary = SyncEngine::new(&store, &platform)
            .backfill_publish_dates()
            .await
            .unwrap();

        assert_eq!(summary.updated, 1);
        assert_eq!(platform.lookup_batch_sizes(), vec![2]);
        assert_eq!(store.video(dated).unwrap().published_at, Some(ts(2018, 3, 3)));
        assert_eq!(store.video(missing).unwrap().published_at, Some(ts(2021, 7, 7)));
        assert_eq!(store.video(unknown).unwrap().published_at, None);
        assert_eq!(platform.page_calls(), 0);
    }

    #[tokio::test]
    async fn backfill_with_nothing_missing_makes_no_calls() {
        let store = InMemoryStore::new();
        store.add_video("dated000001", Uuid::new_v4(), Some(ts(2018, 3, 3)));
        let platform = ScriptedPlatform::new();

        let summary = SyncEngine::new(&store, &platform)
            .backfill_publish_dates()
            .await
            .unwrap();

        assert_eq!(summary.updated, 0);
        assert_eq!(platform.lookup_calls(), 0);
    }
}
