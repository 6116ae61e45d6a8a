//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod playlist_mapping_repo;
pub mod profile_repo;
pub mod sector_repo;
pub mod user_role_repo;
pub mod video_progress_repo;
pub mod video_repo;

pub use playlist_mapping_repo::PlaylistMappingRepo;
pub use profile_repo::ProfileRepo;
pub use sector_repo::SectorRepo;
pub use user_role_repo::UserRoleRepo;
pub use video_progress_repo::VideoProgressRepo;
pub use video_repo::VideoRepo;
