//! Channel normalization
//!
//! Maps a raw parser record into the canonical [`Channel`] entity. Identity is
//! deterministic: the id is a fixed-width digest of the stream URL, so the
//! same endpoint always resolves to the same channel across runs and
//! platforms, which is what makes re-scraping idempotent.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::classify::ClassificationTable;
use crate::models::{Channel, RawChannel, CHANNEL_COUNTRY, INITIAL_HEALTH_SCORE};

/// Hex width of a channel id (64 bits of the digest)
const CHANNEL_ID_HEX_LEN: usize = 16;

/// Derive the stable channel id from a stream URL
///
/// SHA-256 truncated to 16 lowercase hex characters. The digest (rather than
/// a stdlib hasher) keeps ids identical across platforms and Rust releases.
pub fn channel_id(stream_url: &str) -> String {
    let digest = Sha256::digest(stream_url.as_bytes());
    hex::encode(&digest[..CHANNEL_ID_HEX_LEN / 2])
}

/// Build the canonical channel entity from a raw parser record
///
/// Classification consults the manual table on the display name; `first_seen`
/// and `last_seen` are caller-supplied so a scrape run can stamp one
/// consistent timestamp across its whole batch.
pub fn normalize_channel(
    raw: RawChannel,
    table: &ClassificationTable,
    first_seen: DateTime<Utc>,
    last_seen: DateTime<Utc>,
) -> Channel {
    let name = if raw.name.trim().is_empty() {
        "Unknown".to_string()
    } else {
        raw.name.trim().to_string()
    };

    let (language, category) = table.classify(&name);

    Channel {
        id: channel_id(&raw.stream_url),
        name,
        language: language.to_string(),
        category: category.to_string(),
        country: CHANNEL_COUNTRY.to_string(),
        logo: raw.logo,
        group: raw.group,
        source_file: raw.source_file,
        stream_url: raw.stream_url,
        tags: Vec::new(),
        browser_playable: true,
        first_seen,
        last_seen,
        health_score: INITIAL_HEALTH_SCORE,
    }
}
