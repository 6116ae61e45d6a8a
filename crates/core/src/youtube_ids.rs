//! YouTube video and playlist identifier parsing.
//!
//! Admins paste whatever the browser shows them (watch links, short links,
//! embed links, playlist links or bare ids). These helpers normalise that
//! input to the identifiers the Data API expects.

use std::sync::LazyLock;

use regex::Regex;

/// Length of every YouTube video id.
pub const VIDEO_ID_LEN: usize = 11;

static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid regex"));

static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([A-Za-z0-9_-]+)",
    )
    .expect("valid regex")
});

static PLAYLIST_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]list=([A-Za-z0-9_-]+)").expect("valid regex"));

static PLAYLIST_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{10,}$").expect("valid regex"));

/// Returns `true` if `id` has the shape of a YouTube video id.
pub fn is_valid_youtube_id(id: &str) -> bool {
    VIDEO_ID_RE.is_match(id)
}

/// Extract a video id from a bare id or any common YouTube URL form.
///
/// Returns `None` when nothing id-shaped can be found, or when the captured
/// token is not exactly [`VIDEO_ID_LEN`] characters.
pub fn extract_youtube_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if is_valid_youtube_id(input) {
        return Some(input.to_string());
    }

    let id = VIDEO_URL_RE.captures(input)?.get(1)?.as_str();
    is_valid_youtube_id(id).then(|| id.to_string())
}

/// Extract a playlist id from a `list=` URL parameter or a bare playlist id.
pub fn extract_playlist_id(input: &str) -> Option<String> {
    let input = input.trim();

    if let Some(caps) = PLAYLIST_PARAM_RE.captures(input) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }

    PLAYLIST_ID_RE
        .is_match(input)
        .then(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_video_id_is_accepted() {
        assert_eq!(extract_youtube_id("dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(extract_youtube_id("  dQw4w9WgXcQ \n").as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn watch_url_with_extra_params() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLabc&t=42")
                .as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ")
                .as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn short_and_embed_urls() {
        assert_eq!(
            extract_youtube_id("https://youtu.be/dQw4w9WgXcQ?si=xyz").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/v/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn wrong_length_ids_are_rejected() {
        assert!(!is_valid_youtube_id("short"));
        assert!(!is_valid_youtube_id("dQw4w9WgXcQX"));
        assert!(!is_valid_youtube_id("dQw4w9WgX!Q"));
        assert_eq!(extract_youtube_id("https://youtu.be/tooShort"), None);
        assert_eq!(extract_youtube_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(extract_youtube_id(""), None);
    }

    #[test]
    fn playlist_from_url() {
        assert_eq!(
            extract_playlist_id(
                "https://www.youtube.com/playlist?list=PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf"
            )
            .as_deref(),
            Some("PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf")
        );
        assert_eq!(
            extract_playlist_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLsales_2024")
                .as_deref(),
            Some("PLsales_2024")
        );
    }

    #[test]
    fn bare_playlist_id() {
        assert_eq!(
            extract_playlist_id(" PLsales_2024-q1 ").as_deref(),
            Some("PLsales_2024-q1")
        );
        assert_eq!(extract_playlist_id("PLshort"), None);
        assert_eq!(extract_playlist_id("not a playlist at all"), None);
    }
}
