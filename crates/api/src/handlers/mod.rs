pub mod playlist_mappings;
pub mod profile;
pub mod progress;
pub mod sectors;
pub mod users;
pub mod videos;
pub mod youtube_sync;
