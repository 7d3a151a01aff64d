//! Stream classification
//!
//! Pure mapping from probe signals to a [`StreamStatus`]. The decision order
//! is load-bearing: the status reflects the worst applicable signal, not the
//! best, so a reachability failure outranks a fast response time.

use crate::models::StreamStatus;

/// Content-type substrings accepted as media/stream responses
const MEDIA_CONTENT_HINTS: &[&str] = &["mpeg", "video", "m3u", "stream", "octet-stream"];

/// Classify one probe's signals into a stream status
///
/// `phase2_ok` is `None` when the ranged-fetch phase was not attempted.
/// Decision order, first match wins:
/// 1. error status or failed existence check: dead
/// 2. existence check passed but the attempted ranged fetch failed: unstable
/// 3. content type missing or not media-like: unstable if the ranged fetch
///    succeeded, dead otherwise
/// 4. response at or above the slow threshold: slow
/// 5. live
pub fn classify_stream(
    http_status: Option<u16>,
    response_time_ms: u64,
    content_type: Option<&str>,
    phase1_ok: bool,
    phase2_ok: Option<bool>,
    slow_threshold_ms: u64,
) -> StreamStatus {
    if !phase1_ok || http_status.is_some_and(|code| code >= 400) {
        return StreamStatus::Dead;
    }

    if phase2_ok == Some(false) {
        return StreamStatus::Unstable;
    }

    if !is_media_content_type(content_type) {
        return if phase2_ok == Some(true) {
            StreamStatus::Unstable
        } else {
            StreamStatus::Dead
        };
    }

    if response_time_ms >= slow_threshold_ms {
        return StreamStatus::Slow;
    }

    StreamStatus::Live
}

/// Whether a content type looks like a media stream
fn is_media_content_type(content_type: Option<&str>) -> bool {
    match content_type {
        Some(value) if !value.trim().is_empty() => {
            let lowered = value.to_lowercase();
            MEDIA_CONTENT_HINTS.iter().any(|hint| lowered.contains(hint))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLOW_MS: u64 = 3000;

    #[test]
    fn test_fast_media_response_is_live() {
        let status = classify_stream(Some(200), 500, Some("video/mp2t"), true, Some(true), SLOW_MS);
        assert_eq!(status, StreamStatus::Live);
    }

    #[test]
    fn test_slow_media_response_is_slow() {
        let status = classify_stream(Some(200), 4000, Some("video/mp2t"), true, Some(true), SLOW_MS);
        assert_eq!(status, StreamStatus::Slow);
        let boundary = classify_stream(Some(200), 3000, Some("video/mp2t"), true, None, SLOW_MS);
        assert_eq!(boundary, StreamStatus::Slow);
    }

    #[test]
    fn test_error_status_is_dead() {
        let status = classify_stream(Some(404), 100, Some(""), false, Some(false), SLOW_MS);
        assert_eq!(status, StreamStatus::Dead);
        assert_eq!(
            classify_stream(Some(403), 50, Some("video/mp2t"), false, None, SLOW_MS),
            StreamStatus::Dead
        );
    }

    #[test]
    fn test_non_media_content_type_is_unstable_when_range_fetch_worked() {
        let status = classify_stream(Some(200), 200, Some("text/html"), true, Some(true), SLOW_MS);
        assert_eq!(status, StreamStatus::Unstable);
    }

    #[test]
    fn test_non_media_content_type_without_range_fetch_is_dead() {
        let status = classify_stream(Some(200), 200, Some("text/html"), true, None, SLOW_MS);
        assert_eq!(status, StreamStatus::Dead);
        let missing = classify_stream(Some(200), 200, None, true, Some(false), SLOW_MS);
        assert_eq!(missing, StreamStatus::Unstable); // rule 2 fires before rule 3
    }

    #[test]
    fn test_failed_range_fetch_after_ok_head_is_unstable() {
        let status = classify_stream(Some(200), 100, None, true, Some(false), SLOW_MS);
        assert_eq!(status, StreamStatus::Unstable);
    }

    #[test]
    fn test_reachability_outranks_timing() {
        // Worst-signal ordering: a dead check is dead no matter how fast.
        let status = classify_stream(Some(500), 10, Some("video/mp2t"), true, Some(true), SLOW_MS);
        assert_eq!(status, StreamStatus::Dead);
    }

    #[test]
    fn test_media_hints_case_insensitive() {
        assert!(is_media_content_type(Some("Application/OCTET-STREAM")));
        assert!(is_media_content_type(Some("application/x-mpegURL")));
        assert!(is_media_content_type(Some("audio/mpeg")));
        assert!(!is_media_content_type(Some("text/plain")));
        assert!(!is_media_content_type(Some("   ")));
        assert!(!is_media_content_type(None));
    }
}
