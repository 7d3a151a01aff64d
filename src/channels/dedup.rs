//! Channel deduplication
//!
//! Collapses multiple entries pointing at the same stream endpoint. This is a
//! stable filter, not a merge: the first record seen for each `stream_url`
//! survives unchanged and later duplicates are discarded outright.

use std::collections::HashSet;

use tracing::debug;

use crate::models::Channel;

/// Retain the first channel per distinct `stream_url`, preserving order
pub fn dedupe_channels(channels: Vec<Channel>) -> Vec<Channel> {
    let mut seen: HashSet<String> = HashSet::with_capacity(channels.len());
    let mut unique = Vec::with_capacity(channels.len());
    let mut duplicates = 0usize;

    for channel in channels {
        if seen.insert(channel.stream_url.clone()) {
            unique.push(channel);
        } else {
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        debug!("Discarded {} duplicate stream URLs", duplicates);
    }

    unique
}
