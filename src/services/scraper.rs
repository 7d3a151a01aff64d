//! Scrape run orchestration
//!
//! Drives the full ingestion pipeline: source list → fetch raw text per
//! source → parse → normalize → dedup → merge into the persisted channel set.
//! A failing source is skipped and the batch continues; the run fails only
//! when every source failed.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{info, warn};

use crate::channels::{dedupe_channels, normalize_channel};
use crate::classify::ClassificationTable;
use crate::errors::{AppError, AppResult};
use crate::models::Channel;
use crate::sources::PlaylistFetcher;
use crate::storage::ChannelStore;

/// Counters from one scrape run
#[derive(Debug, Clone, Default)]
pub struct ScrapeOutcome {
    pub scraped: usize,
    pub new_channels: usize,
    pub total_channels: usize,
}

/// Scrape pipeline service
pub struct ScraperService<F: PlaylistFetcher> {
    fetcher: F,
    table: &'static ClassificationTable,
}

impl<F: PlaylistFetcher> ScraperService<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            table: ClassificationTable::builtin(),
        }
    }

    /// Fetch and aggregate all sources into a deduplicated channel batch
    ///
    /// Every channel in the batch gets the same scrape timestamp for both
    /// `first_seen` and `last_seen`; the merge step decides which of them
    /// actually enter the persisted set.
    pub async fn scrape(&self, source_urls: &[String]) -> AppResult<Vec<Channel>> {
        if source_urls.is_empty() {
            return Err(AppError::run_failed("source list is empty"));
        }

        let scraped_at = Utc::now();
        let mut raw_channels = Vec::new();
        let mut failed = 0usize;

        for url in source_urls {
            match self.fetcher.fetch_playlist(url).await {
                Ok(content) => {
                    let parsed = crate::sources::parse_m3u(&content, url);
                    info!("Source {} yielded {} entries", url, parsed.len());
                    raw_channels.extend(parsed);
                }
                Err(e) => {
                    warn!("Skipping source {}: {}", url, e);
                    failed += 1;
                }
            }
        }

        if failed == source_urls.len() {
            return Err(AppError::run_failed(format!(
                "all {} sources failed, no playlists fetched",
                source_urls.len()
            )));
        }

        let normalized: Vec<Channel> = raw_channels
            .into_iter()
            .map(|raw| normalize_channel(raw, self.table, scraped_at, scraped_at))
            .collect();

        Ok(dedupe_channels(normalized))
    }

    /// Run the scrape end to end against the persisted store
    pub async fn run(&self, source_urls: &[String], store: &ChannelStore) -> AppResult<ScrapeOutcome> {
        let scraped = self.scrape(source_urls).await?;
        let existing = store.load().map_err(AppError::Storage)?;

        let existing_count = existing.len();
        let scraped_count = scraped.len();
        let (merged, new_channels) = merge_channels(existing, scraped);
        store.save(&merged).map_err(AppError::Storage)?;

        let outcome = ScrapeOutcome {
            scraped: scraped_count,
            new_channels,
            total_channels: merged.len(),
        };
        info!(
            "Scrape complete: {} scraped, {} new, {} existing, {} total",
            scraped_count, new_channels, existing_count, outcome.total_channels
        );
        Ok(outcome)
    }
}

/// Merge freshly scraped channels into the existing persisted set
///
/// Existing entities always win: re-scraping a known `stream_url` never
/// recreates the channel or touches its timestamps and health score. Only
/// channels with unseen stream URLs are appended.
pub fn merge_channels(existing: Vec<Channel>, incoming: Vec<Channel>) -> (Vec<Channel>, usize) {
    let mut known: HashSet<String> = existing.iter().map(|c| c.stream_url.clone()).collect();
    let mut merged = existing;
    let mut added = 0usize;

    for channel in incoming {
        if known.insert(channel.stream_url.clone()) {
            merged.push(channel);
            added += 1;
        }
    }

    (merged, added)
}
