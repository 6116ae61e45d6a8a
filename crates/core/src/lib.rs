//! Domain primitives shared by every academy crate.
//!
//! Holds the id/timestamp aliases, the domain error type, role names and the
//! YouTube link parsing helpers. Nothing in here touches the network or the
//! database.

pub mod error;
pub mod roles;
pub mod types;
pub mod youtube_ids;
