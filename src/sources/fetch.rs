//! Playlist fetching
//!
//! Fetches raw playlist text per source and rejects content that does not
//! carry the M3U magic marker before it ever reaches the parser. A failing
//! source is the caller's problem to skip; this layer reports one source at a
//! time.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::errors::{SourceError, SourceResult};

/// How far into the content the `#EXTM3U` marker may appear
const M3U_MAGIC_WINDOW: usize = 2048;
const M3U_MAGIC: &str = "#EXTM3U";

/// Seam for fetching playlist text, so the scrape pipeline can run against
/// fixtures in tests
#[async_trait]
pub trait PlaylistFetcher: Send + Sync {
    /// Fetch raw playlist text for one source URL
    async fn fetch_playlist(&self, url: &str) -> SourceResult<String>;
}

/// HTTP playlist fetcher backed by the shared reqwest client
pub struct HttpPlaylistFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpPlaylistFetcher {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl PlaylistFetcher for HttpPlaylistFetcher {
    async fn fetch_playlist(&self, url: &str) -> SourceResult<String> {
        debug!("Fetching playlist from: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    SourceError::fetch_failed(url, e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content = response
            .text()
            .await
            .map_err(|e| SourceError::fetch_failed(url, e.to_string()))?;

        validate_m3u_magic(&content, url)?;

        debug!("Fetched {} characters of playlist text", content.len());
        Ok(content)
    }
}

/// Reject content without the `#EXTM3U` marker in its leading window
///
/// Some hosts prepend BOMs or blank lines, so the marker is searched for
/// rather than required at offset zero.
fn validate_m3u_magic(content: &str, url: &str) -> SourceResult<()> {
    let window_end = content
        .char_indices()
        .map(|(i, _)| i)
        .nth(M3U_MAGIC_WINDOW)
        .unwrap_or(content.len());

    if content[..window_end].contains(M3U_MAGIC) {
        Ok(())
    } else {
        Err(SourceError::NotM3u {
            url: url.to_string(),
        })
    }
}
