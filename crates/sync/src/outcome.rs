//! Run accumulators and the summaries returned to the caller.

use serde::Serialize;

/// Counts and error strings accumulated while syncing.
///
/// Built per page, merged into the per-playlist outcome, then into the
/// run total.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub synced: u32,
    pub skipped: u32,
    pub errors: Vec<String>,
}

impl SyncOutcome {
    pub fn merge(&mut self, other: SyncOutcome) {
        self.synced += other.synced;
        self.skipped += other.skipped;
        self.errors.extend(other.errors);
    }

    pub fn into_summary(self) -> SyncSummary {
        let message = if self.synced > 0 {
            format!("Sync complete! {} video(s) added.", self.synced)
        } else {
            "No new videos found.".to_string()
        };

        SyncSummary {
            message,
            synced: self.synced,
            skipped: self.skipped,
            errors: self.errors,
        }
    }
}

/// Response body of a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub message: String,
    pub synced: u32,
    pub skipped: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl SyncSummary {
    /// Summary for a run with nothing configured.
    pub fn no_mappings() -> Self {
        Self {
            message: "No playlists configured. Add playlist mappings first.".to_string(),
            synced: 0,
            skipped: 0,
            errors: Vec::new(),
        }
    }
}

/// Response body of a publish-date backfill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackfillSummary {
    pub message: String,
    pub updated: u32,
}

impl BackfillSummary {
    pub fn new(updated: u32) -> Self {
        let message = if updated > 0 {
            format!("Backfill complete! {updated} video(s) updated.")
        } else {
            "No publish dates were updated.".to_string()
        };
        Self { message, updated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_adds_counts_and_keeps_error_order() {
        let mut total = SyncOutcome {
            synced: 2,
            skipped: 1,
            errors: vec!["Playlist Sales: 404".into()],
        };
        total.merge(SyncOutcome {
            synced: 3,
            skipped: 0,
            errors: vec!["Video Intro: could not be saved".into()],
        });

        assert_eq!(total.synced, 5);
        assert_eq!(total.skipped, 1);
        assert_eq!(
            total.errors,
            vec!["Playlist Sales: 404", "Video Intro: could not be saved"]
        );
    }

    #[test]
    fn empty_errors_are_omitted_from_json() {
        let summary = SyncOutcome {
            synced: 4,
            skipped: 1,
            errors: Vec::new(),
        }
        .into_summary();

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({ "message": "Sync complete! 4 video(s) added.", "synced": 4, "skipped": 1 })
        );
    }

    #[test]
    fn errors_are_serialized_when_present() {
        let summary = SyncOutcome {
            synced: 0,
            skipped: 0,
            errors: vec!["Playlist Stock: 403".into()],
        }
        .into_summary();

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["message"], "No new videos found.");
        assert_eq!(value["errors"], json!(["Playlist Stock: 403"]));
    }

    #[test]
    fn no_mappings_summary_shape() {
        let value = serde_json::to_value(SyncSummary::no_mappings()).unwrap();
        assert_eq!(value["synced"], 0);
        assert_eq!(value["skipped"], 0);
        assert!(value.get("errors").is_none());
    }
}
