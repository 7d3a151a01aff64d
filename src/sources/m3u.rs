//! M3U playlist parser
//!
//! Turns raw playlist text into an ordered sequence of [`RawChannel`] records.
//! The parser never fails: malformed entries are dropped and scanning resumes
//! at the next `#EXTINF` marker, so one broken line cannot poison a playlist.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::RawChannel;
use crate::utils::url::UrlUtils;

const EXTINF_MARKER: &str = "#EXTINF";

/// Parse M3U content into raw channel records
///
/// A channel entry is an `#EXTINF` line followed by the next non-empty,
/// non-comment line, which must be an HTTP(S) URL. Comment and blank lines in
/// between are skipped. Entries that never reach a usable URL (EOF, empty
/// line run, non-HTTP scheme, or another `#EXTINF` first) are dropped.
pub fn parse_m3u(content: &str, source_url: &str) -> Vec<RawChannel> {
    let mut channels = Vec::new();
    let mut pending: Option<PendingEntry> = None;
    let mut dropped = 0usize;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with(EXTINF_MARKER) {
            if pending.is_some() {
                // Marker before the previous entry found its URL
                dropped += 1;
            }
            pending = Some(parse_extinf_line(line));
            continue;
        }

        if line.starts_with('#') {
            // Unrelated directive or comment between EXTINF and URL
            continue;
        }

        // First non-comment line after a marker is the stream URL
        if let Some(entry) = pending.take() {
            if UrlUtils::is_http_url(line) {
                channels.push(RawChannel {
                    name: entry.name,
                    stream_url: line.to_string(),
                    logo: entry.logo,
                    group: entry.group,
                    source_file: source_url.to_string(),
                    attributes: entry.attributes,
                });
            } else {
                debug!("Dropping entry '{}': URL is not http(s): {}", entry.name, line);
                dropped += 1;
            }
        }
        // URL line with no pending EXTINF: nothing to attach it to
    }

    if pending.is_some() {
        // EOF before the last entry's URL line
        dropped += 1;
    }

    if dropped > 0 {
        warn!(
            "Dropped {} malformed entries while parsing playlist {}",
            dropped, source_url
        );
    }
    debug!("Parsed {} channels from playlist {}", channels.len(), source_url);

    channels
}

struct PendingEntry {
    name: String,
    logo: Option<String>,
    group: Option<String>,
    attributes: HashMap<String, String>,
}

/// Split an EXTINF line into its display name and attribute map
///
/// Format: `#EXTINF:duration attr="value" ...,Display Name`. The last comma
/// separates the attribute segment from the name; attribute values may
/// themselves contain commas, which is why `rfind` is used. A line with no
/// comma yields an empty name and whatever attributes can be salvaged.
fn parse_extinf_line(line: &str) -> PendingEntry {
    let content = line.strip_prefix(EXTINF_MARKER).unwrap_or(line);
    let content = content.strip_prefix(':').unwrap_or(content);

    let (attrs_part, name) = match content.rfind(',') {
        Some(comma) => {
            let (head, tail) = content.split_at(comma);
            (head, tail.trim_start_matches(',').trim())
        }
        None => (content, ""),
    };

    let attributes = parse_extinf_attributes(attrs_part);

    PendingEntry {
        name: name.to_string(),
        logo: attributes.get("tvg-logo").cloned().filter(|v| !v.is_empty()),
        group: attributes
            .get("group-title")
            .cloned()
            .filter(|v| !v.is_empty()),
        attributes,
    }
}

/// Extract `key="value"` pairs from the EXTINF attribute segment
///
/// Character-walking scanner rather than a regex; tolerates stray tokens,
/// unterminated quotes, and unquoted values by simply not extracting them as
/// pairs. Unrecognized keys are kept in the map untouched.
fn parse_extinf_attributes(attrs_part: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();

    let mut chars = attrs_part.chars().peekable();
    let mut current_key = String::new();
    let mut current_value = String::new();
    let mut in_quotes = false;
    let mut in_key = false;
    let mut in_value = false;

    while let Some(ch) = chars.next() {
        match ch {
            ' ' | '\t' if !in_quotes => {
                if in_value {
                    if !current_key.is_empty() && !current_value.is_empty() {
                        attributes.insert(current_key.clone(), current_value.clone());
                    }
                    current_key.clear();
                    current_value.clear();
                }
                in_key = true;
                in_value = false;
            }
            '=' if !in_quotes && in_key => {
                in_key = false;
                in_value = true;
                if chars.peek() == Some(&'"') {
                    chars.next();
                    in_quotes = true;
                }
            }
            '"' if in_value => {
                in_quotes = false;
                if !current_key.is_empty() {
                    attributes.insert(current_key.clone(), current_value.clone());
                }
                current_key.clear();
                current_value.clear();
                in_value = false;
            }
            _ => {
                if in_key {
                    current_key.push(ch);
                } else if in_value {
                    current_value.push(ch);
                }
            }
        }
    }

    if in_value && !in_quotes && !current_key.is_empty() && !current_value.is_empty() {
        attributes.insert(current_key, current_value);
    }

    attributes
}
