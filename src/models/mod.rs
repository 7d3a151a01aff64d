//! Core data models for iptv-sentinel
//!
//! `Channel` is the canonical persisted entity: `stream_url` is its true
//! identity and `id` is a deterministic digest of it, so re-scraping the same
//! endpoint always recovers the same entity. `ProbeResult` is the ephemeral
//! per-cycle record that gets folded back into a `Channel` by the health
//! updater and written out in the daily report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed country label applied to every channel in the current scope
pub const CHANNEL_COUNTRY: &str = "India";

/// Initial health score for a freshly scraped channel
pub const INITIAL_HEALTH_SCORE: f64 = 1.0;

/// A raw channel record as emitted by the playlist parser
///
/// Order of records reflects source order. The attribute map keeps every
/// `key="value"` pair found on the EXTINF line so downstream consumers can
/// pick up hints the normalizer does not use.
#[derive(Debug, Clone, PartialEq)]
pub struct RawChannel {
    pub name: String,
    pub stream_url: String,
    pub logo: Option<String>,
    pub group: Option<String>,
    pub source_file: String,
    pub attributes: HashMap<String, String>,
}

/// Canonical persisted channel entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Deterministic hex digest of `stream_url`; stable across runs
    pub id: String,
    pub name: String,
    pub language: String,
    pub category: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Origin playlist URL, kept for provenance
    pub source_file: String,
    /// The stream endpoint; unique across the persisted channel set
    pub stream_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub browser_playable: bool,
    pub first_seen: DateTime<Utc>,
    /// Advances only on a live/slow probe outcome
    pub last_seen: DateTime<Utc>,
    pub health_score: f64,
}

/// Stream liveness classification produced by one probe cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Live,
    Slow,
    Unstable,
    Dead,
}

impl StreamStatus {
    /// Whether this outcome counts as a positive sighting of the stream
    pub fn is_positive(&self) -> bool {
        matches!(self, StreamStatus::Live | StreamStatus::Slow)
    }
}

impl std::fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamStatus::Live => write!(f, "live"),
            StreamStatus::Slow => write!(f, "slow"),
            StreamStatus::Unstable => write!(f, "unstable"),
            StreamStatus::Dead => write!(f, "dead"),
        }
    }
}

impl std::str::FromStr for StreamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(StreamStatus::Live),
            "slow" => Ok(StreamStatus::Slow),
            "unstable" => Ok(StreamStatus::Unstable),
            "dead" => Ok(StreamStatus::Dead),
            other => Err(format!("Invalid stream status: {other}")),
        }
    }
}

/// Result of probing a single channel's stream URL
///
/// Every probe terminates in one of these; probe failures are encoded in
/// `status`/`error`, never raised to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub channel_id: String,
    pub name: String,
    pub url: String,
    pub status: StreamStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub response_time_ms: u64,
    pub checked_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-status counts for one probe run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeSummary {
    pub live: usize,
    pub slow: usize,
    pub unstable: usize,
    pub dead: usize,
}

impl ProbeSummary {
    /// Tally the statuses of a result set
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.status {
                StreamStatus::Live => summary.live += 1,
                StreamStatus::Slow => summary.slow += 1,
                StreamStatus::Unstable => summary.unstable += 1,
                StreamStatus::Dead => summary.dead += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.live + self.slow + self.unstable + self.dead
    }
}

/// Dated batch-probe report, one file per UTC calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// UTC date the report belongs to (YYYY-MM-DD)
    pub date: chrono::NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub summary: ProbeSummary,
    pub results: Vec<ProbeResult>,
}
