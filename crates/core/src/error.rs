//! Domain errors shared by the academy crates.
//!
//! The HTTP layer maps each variant onto a status code; nothing here knows
//! about HTTP.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No row with this id exists.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a shape or range check.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request is well-formed but clashes with the current state,
    /// e.g. demoting the last remaining admin.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
