//! Shared response envelope types for catalogue handlers.
//!
//! Catalogue responses use a `{ "data": ... }` envelope. The sync endpoint
//! is the exception: its summary is returned bare, because admin tooling
//! reads `message`, `synced` and `skipped` at the top level.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: sectors }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
