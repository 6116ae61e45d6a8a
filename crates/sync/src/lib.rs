//! YouTube playlist synchronization.
//!
//! [`SyncEngine`] pulls every configured playlist into the `videos` table
//! and can backfill missing publish dates. It talks to the outside world
//! only through two seams:
//!
//! - [`VideoPlatform`] -- the external video API (implemented for
//!   [`academy_youtube::YouTubeApi`]).
//! - [`SyncStore`] -- the relational store (implemented by [`PgSyncStore`]).

pub mod engine;
pub mod outcome;
pub mod platform;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use engine::{SyncEngine, SyncError, LOOKUP_BATCH_SIZE};
pub use outcome::{BackfillSummary, SyncOutcome, SyncSummary};
pub use platform::{PlatformError, PlaylistEntry, PlaylistPage, VideoPlatform};
pub use store::{InsertOutcome, PgSyncStore, SyncStore};
