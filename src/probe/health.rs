//! Health score updating
//!
//! Folds the latest probe outcome into a channel's rolling reliability score.
//! The nudge is asymmetric (failures cost more than successes earn) and the
//! score is clamped to [0.0, 1.0]; no windowed history is kept, the scalar is
//! the whole memory.

use crate::models::{Channel, ProbeResult, StreamStatus};

/// One-step score update for a probe outcome, clamped to [0.0, 1.0]
pub fn nudge_health_score(current: f64, status: StreamStatus) -> f64 {
    let delta = match status {
        StreamStatus::Live => 0.01,
        StreamStatus::Slow => 0.005,
        StreamStatus::Unstable => -0.02,
        StreamStatus::Dead => -0.05,
    };
    (current + delta).clamp(0.0, 1.0)
}

/// Fold a probe result into its channel
///
/// `last_seen` advances only on positive outcomes (live/slow); a dead probe
/// must not refresh the sighting timestamp.
pub fn apply_probe_result(channel: &mut Channel, result: &ProbeResult) {
    channel.health_score = nudge_health_score(channel.health_score, result.status);
    if result.status.is_positive() {
        channel.last_seen = result.checked_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_nudge_deltas() {
        assert!((nudge_health_score(0.5, StreamStatus::Live) - 0.51).abs() < 1e-12);
        assert!((nudge_health_score(0.5, StreamStatus::Slow) - 0.505).abs() < 1e-12);
        assert!((nudge_health_score(0.5, StreamStatus::Unstable) - 0.48).abs() < 1e-12);
        assert!((nudge_health_score(0.5, StreamStatus::Dead) - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_score_clamped_at_one() {
        assert_eq!(nudge_health_score(1.0, StreamStatus::Live), 1.0);
        assert_eq!(nudge_health_score(0.999, StreamStatus::Live), 1.0);
    }

    #[test]
    fn test_repeated_dead_converges_to_exact_zero() {
        let mut score = 1.0;
        for _ in 0..200 {
            score = nudge_health_score(score, StreamStatus::Dead);
            assert!((0.0..=1.0).contains(&score));
        }
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_score_never_leaves_unit_interval() {
        let sequence = [
            StreamStatus::Dead,
            StreamStatus::Live,
            StreamStatus::Unstable,
            StreamStatus::Slow,
            StreamStatus::Dead,
            StreamStatus::Dead,
            StreamStatus::Live,
        ];
        let mut score = 1.0;
        for _ in 0..500 {
            for status in sequence {
                score = nudge_health_score(score, status);
                assert!((0.0..=1.0).contains(&score));
            }
        }
    }

    fn result_with_status(status: StreamStatus) -> ProbeResult {
        ProbeResult {
            channel_id: "abc".into(),
            name: "Test".into(),
            url: "http://example.com/a.ts".into(),
            status,
            http_status: Some(200),
            content_type: Some("video/mp2t".into()),
            response_time_ms: 100,
            checked_at: Utc::now(),
            error: None,
        }
    }

    #[test]
    fn test_last_seen_advances_only_on_positive_outcomes() {
        let old = Utc::now() - chrono::Duration::days(3);
        let mut channel = crate::channels::normalize_channel(
            crate::models::RawChannel {
                name: "Test".into(),
                stream_url: "http://example.com/a.ts".into(),
                logo: None,
                group: None,
                source_file: "src".into(),
                attributes: Default::default(),
            },
            crate::classify::ClassificationTable::builtin(),
            old,
            old,
        );

        let dead = result_with_status(StreamStatus::Dead);
        apply_probe_result(&mut channel, &dead);
        assert_eq!(channel.last_seen, old);

        let unstable = result_with_status(StreamStatus::Unstable);
        apply_probe_result(&mut channel, &unstable);
        assert_eq!(channel.last_seen, old);

        let live = result_with_status(StreamStatus::Live);
        apply_probe_result(&mut channel, &live);
        assert_eq!(channel.last_seen, live.checked_at);

        let slow = result_with_status(StreamStatus::Slow);
        apply_probe_result(&mut channel, &slow);
        assert_eq!(channel.last_seen, slow.checked_at);
    }
}
