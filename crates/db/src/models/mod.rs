//! Row models and insert DTOs, one module per table.

pub mod playlist_mapping;
pub mod profile;
pub mod sector;
pub mod user_role;
pub mod video;
pub mod video_progress;
