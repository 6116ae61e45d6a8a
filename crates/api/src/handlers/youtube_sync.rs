//! Handler for `POST /youtube/sync`.
//!
//! Admin only. Runs either a playlist sync or a publish-date backfill and
//! returns the summary bare (no `data` envelope).

use academy_sync::{BackfillSummary, SyncEngine, SyncSummary};
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Message returned when no YouTube API key is configured.
pub const MISSING_API_KEY: &str = "YouTube API key is not configured";

/// Optional request body. An empty body means a regular sync.
#[derive(Debug, Default, Deserialize)]
pub struct SyncRequest {
    /// Backfill publish dates of stored videos instead of syncing playlists.
    #[serde(rename = "updateExisting", default)]
    pub update_existing: bool,
}

/// Either summary, serialized without a discriminator.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SyncResponse {
    Sync(SyncSummary),
    Backfill(BackfillSummary),
}

/// POST /api/v1/youtube/sync
pub async fn sync_youtube(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    body: Bytes,
) -> AppResult<Json<SyncResponse>> {
    let Some(platform) = state.video_platform.as_deref() else {
        return Err(AppError::Misconfigured(MISSING_API_KEY.into()));
    };

    let request = parse_request(&body)?;
    let engine = SyncEngine::new(state.sync_store.as_ref(), platform);

    let response = if request.update_existing {
        tracing::info!(user_id = %admin.user_id, "Publish date backfill requested");
        let summary = engine
            .backfill_publish_dates()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        SyncResponse::Backfill(summary)
    } else {
        tracing::info!(user_id = %admin.user_id, "Playlist sync requested");
        let summary = engine
            .sync_playlists(admin.user_id)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        SyncResponse::Sync(summary)
    };

    Ok(Json(response))
}

fn parse_request(body: &[u8]) -> AppResult<SyncRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SyncRequest::default());
    }
    serde_json::from_slice::<Option<SyncRequest>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_body_is_a_regular_sync() {
        assert!(!parse_request(b"").unwrap().update_existing);
        assert!(!parse_request(b"  \n").unwrap().update_existing);
    }

    #[test]
    fn null_and_empty_object_are_a_regular_sync() {
        assert!(!parse_request(b"null").unwrap().update_existing);
        assert!(!parse_request(b"{}").unwrap().update_existing);
    }

    #[test]
    fn update_existing_selects_backfill() {
        assert!(parse_request(br#"{"updateExisting": true}"#).unwrap().update_existing);
    }

    #[test]
    fn malformed_body_is_rejected() {
        assert_matches!(parse_request(b"{not json"), Err(AppError::BadRequest(_)));
    }
}
