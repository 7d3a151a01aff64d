//! Stream prober
//!
//! Issues bounded-concurrency liveness checks against channel stream URLs.
//! Each channel gets a two-phase probe: a lightweight HEAD existence check,
//! then, when that fails or leaves no usable content type, a ranged GET for
//! the first chunk of the stream to distinguish "unreachable" from "slow to
//! start but playable".
//!
//! Concurrency is bounded twice: a global semaphore caps probes in flight,
//! and a keyed per-host semaphore caps simultaneous probes against a single
//! origin so one slow host cannot starve the batch or trip rate limiting.
//! Every code path terminates in a [`ProbeResult`]; a single channel's
//! failure never fails the batch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use reqwest::{header, Client};
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

use crate::config::ProbeConfig;
use crate::models::{Channel, ProbeResult, StreamStatus};
use crate::probe::classifier::classify_stream;
use crate::utils::url::UrlUtils;

/// Owned slice of a channel handed to a probe task
#[derive(Debug, Clone)]
struct ProbeTarget {
    id: String,
    name: String,
    url: String,
}

/// Bounded-concurrency stream prober
pub struct StreamProber {
    client: Client,
    config: ProbeConfig,
    global_limit: Arc<Semaphore>,
    host_limits: Arc<Mutex<HashMap<String, Arc<Semaphore>>>>,
}

impl StreamProber {
    pub fn new(client: Client, config: ProbeConfig) -> Self {
        let global_limit = Arc::new(Semaphore::new(config.max_concurrent_probes.max(1)));
        Self {
            client,
            config,
            global_limit,
            host_limits: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Probe every channel in the batch
    ///
    /// Results are 1:1 with the input, in input order. Panicking probe tasks
    /// are converted into dead results rather than aborting the batch.
    pub async fn probe_batch(&self, channels: &[Channel]) -> Vec<ProbeResult> {
        let handles: Vec<_> = channels
            .iter()
            .map(|channel| {
                let target = ProbeTarget {
                    id: channel.id.clone(),
                    name: channel.name.clone(),
                    url: channel.stream_url.clone(),
                };
                let client = self.client.clone();
                let config = self.config.clone();
                let global_limit = self.global_limit.clone();
                let host_limits = self.host_limits.clone();

                tokio::spawn(async move {
                    // Host permit first: a task queued on a saturated host
                    // must not hold a global slot while it waits.
                    let _host = Self::host_permit(&host_limits, &config, &target.url).await;
                    let _global = global_limit.acquire_owned().await.ok();
                    Self::probe_channel(&client, &config, &target).await
                })
            })
            .collect();

        let mut results = Vec::with_capacity(channels.len());
        for (joined, channel) in join_all(handles).await.into_iter().zip(channels) {
            let result = match joined {
                Ok(result) => result,
                Err(e) => {
                    warn!("Probe task for channel {} failed: {}", channel.id, e);
                    ProbeResult {
                        channel_id: channel.id.clone(),
                        name: channel.name.clone(),
                        url: channel.stream_url.clone(),
                        status: StreamStatus::Dead,
                        http_status: None,
                        content_type: None,
                        response_time_ms: 0,
                        checked_at: Utc::now(),
                        error: Some(format!("probe task failed: {e}")),
                    }
                }
            };
            results.push(result);
        }
        results
    }

    /// Acquire the per-host permit for a URL's origin
    ///
    /// Semaphores are created on first sight of a host and shared for the
    /// prober's lifetime. Acquisition queues rather than rejects; the cap is
    /// about protecting individual origins, not aggregate throughput.
    async fn host_permit(
        host_limits: &Mutex<HashMap<String, Arc<Semaphore>>>,
        config: &ProbeConfig,
        url: &str,
    ) -> Option<OwnedSemaphorePermit> {
        let key = UrlUtils::host_key(url);
        let semaphore = {
            let mut limits = host_limits.lock().await;
            limits
                .entry(key)
                .or_insert_with(|| Arc::new(Semaphore::new(config.max_probes_per_host.max(1))))
                .clone()
        };
        semaphore.acquire_owned().await.ok()
    }

    /// Run the two-phase probe for one channel
    async fn probe_channel(client: &Client, config: &ProbeConfig, target: &ProbeTarget) -> ProbeResult {
        let started = Instant::now();
        let mut http_status: Option<u16> = None;
        let mut content_type: Option<String> = None;
        let mut error: Option<String> = None;
        let mut phase1_ok = false;

        // Phase 1: existence check, no body transfer
        match client
            .head(&target.url)
            .timeout(config.head_timeout())
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status().as_u16();
                http_status = Some(status);
                content_type = header_value(&response, header::CONTENT_TYPE);
                phase1_ok = status < 400;
                if !phase1_ok {
                    error = Some(format!("existence check returned HTTP {status}"));
                }
            }
            Err(e) => {
                error = Some(e.to_string());
            }
        }

        // Response time covers the deciding phase only; the phase-2 body
        // drain below is diagnostic and must not push a stream into slow.
        let mut response_time_ms = started.elapsed().as_millis() as u64;

        // Phase 2: partial-content fetch when the existence check failed or
        // left us without a content type to judge
        let mut phase2_ok: Option<bool> = None;
        if !phase1_ok || content_type.is_none() {
            match Self::range_fetch(client, config, &target.url, started).await {
                Ok(fetch) => {
                    if http_status.is_none() {
                        http_status = Some(fetch.status);
                    }
                    if content_type.is_none() {
                        content_type = fetch.content_type;
                    }
                    debug!(
                        "Range fetch for {} read {} bytes (HTTP {})",
                        target.id, fetch.bytes_read, fetch.status
                    );
                    response_time_ms = fetch.response_time_ms;
                    phase2_ok = Some(fetch.status < 400);
                }
                Err(e) => {
                    error.get_or_insert(e);
                    response_time_ms = started.elapsed().as_millis() as u64;
                    phase2_ok = Some(false);
                }
            }
        }

        let status = classify_stream(
            http_status,
            response_time_ms,
            content_type.as_deref(),
            phase1_ok,
            phase2_ok,
            config.slow_threshold_ms,
        );

        ProbeResult {
            channel_id: target.id.clone(),
            name: target.name.clone(),
            url: target.url.clone(),
            status,
            http_status,
            content_type,
            response_time_ms,
            checked_at: Utc::now(),
            error,
        }
    }

    /// Issue the capped byte-range request and drain up to the cap
    ///
    /// Bytes read are diagnostic only; liveness is judged from the status
    /// code, and the response time is stamped when the status line arrives,
    /// not after the drain. The request timeout covers the body read as well.
    async fn range_fetch(
        client: &Client,
        config: &ProbeConfig,
        url: &str,
        started: Instant,
    ) -> Result<RangeFetch, String> {
        let range = format!("bytes=0-{}", config.range_bytes.saturating_sub(1));
        let mut response = client
            .get(url)
            .header(header::RANGE, range)
            .timeout(config.range_timeout())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let response_time_ms = started.elapsed().as_millis() as u64;
        let content_type = header_value(&response, header::CONTENT_TYPE);

        let mut bytes_read: u64 = 0;
        if status < 400 {
            // Servers that ignore Range keep sending; stop at the cap either way
            while bytes_read < config.range_bytes {
                match response.chunk().await {
                    Ok(Some(chunk)) => bytes_read += chunk.len() as u64,
                    Ok(None) => break,
                    Err(_) => break,
                }
            }
        }

        Ok(RangeFetch {
            status,
            content_type,
            response_time_ms,
            bytes_read,
        })
    }
}

struct RangeFetch {
    status: u16,
    content_type: Option<String>,
    /// Elapsed from probe start to this response's status line
    response_time_ms: u64,
    bytes_read: u64,
}

fn header_value(response: &reqwest::Response, name: header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::normalize_channel;
    use crate::classify::ClassificationTable;
    use crate::models::RawChannel;
    use crate::utils::build_http_client;
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn channel(name: &str, url: &str) -> Channel {
        let now = Utc::now();
        normalize_channel(
            RawChannel {
                name: name.to_string(),
                stream_url: url.to_string(),
                logo: None,
                group: None,
                source_file: "src".to_string(),
                attributes: Default::default(),
            },
            ClassificationTable::builtin(),
            now,
            now,
        )
    }

    fn quick_config() -> ProbeConfig {
        ProbeConfig {
            head_timeout_secs: 2,
            range_timeout_secs: 2,
            ..ProbeConfig::default()
        }
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let prober = StreamProber::new(build_http_client("test"), quick_config());
        assert!(prober.probe_batch(&[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_dead_result_not_error() {
        // Nothing listens on the discard port; connection is refused quickly.
        let channels = vec![
            channel("Down A", "http://127.0.0.1:9/a.ts"),
            channel("Down B", "http://127.0.0.1:9/b.ts"),
        ];
        let prober = StreamProber::new(build_http_client("test"), quick_config());
        let results = prober.probe_batch(&channels).await;

        assert_eq!(results.len(), 2);
        for (result, channel) in results.iter().zip(&channels) {
            assert_eq!(result.channel_id, channel.id);
            assert_eq!(result.status, StreamStatus::Dead);
            assert!(result.error.is_some());
        }
    }

    #[tokio::test]
    async fn test_host_permits_shared_per_origin() {
        let config = ProbeConfig {
            max_probes_per_host: 2,
            ..ProbeConfig::default()
        };
        let limits: Mutex<HashMap<String, Arc<Semaphore>>> = Mutex::new(HashMap::new());

        let p1 = StreamProber::host_permit(&limits, &config, "http://cdn.example.com/a.ts").await;
        let p2 = StreamProber::host_permit(&limits, &config, "http://cdn.example.com/b.ts").await;
        assert!(p1.is_some());
        assert!(p2.is_some());

        // Both permits came from the same semaphore, which is now exhausted.
        let semaphore = limits
            .lock()
            .await
            .get("cdn.example.com")
            .cloned()
            .expect("host entry created");
        assert_eq!(semaphore.available_permits(), 0);

        // A different origin gets its own semaphore and is unaffected.
        let p3 = StreamProber::host_permit(&limits, &config, "http://other.example.com/c.ts").await;
        assert!(p3.is_some());

        drop(p1);
        drop(p2);
        assert_eq!(semaphore.available_permits(), 2);
    }

    async fn bind_local() -> (TcpListener, SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, addr)
    }

    #[tokio::test]
    async fn test_saturated_host_does_not_starve_other_hosts() {
        // Accepts connections and never responds; probes against it burn
        // their full timeout budget.
        let (slow, slow_addr) = bind_local().await;
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = slow.accept().await {
                held.push(socket);
            }
        });

        // Responds immediately; reports when it first saw a connection.
        let (fast, fast_addr) = bind_local().await;
        let (first_hit_tx, first_hit_rx) = tokio::sync::oneshot::channel();
        tokio::spawn(async move {
            let mut first_hit = Some(first_hit_tx);
            while let Ok((mut socket, _)) = fast.accept().await {
                if let Some(tx) = first_hit.take() {
                    let _ = tx.send(Instant::now());
                }
                let mut buf = [0u8; 512];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\nContent-Type: video/mp2t\r\n\
                          Content-Length: 0\r\nConnection: close\r\n\r\n",
                    )
                    .await;
            }
        });

        let channels = vec![
            channel("Slow A", &format!("http://{slow_addr}/a.ts")),
            channel("Slow B", &format!("http://{slow_addr}/b.ts")),
            channel("Fast", &format!("http://{fast_addr}/c.ts")),
        ];
        let config = ProbeConfig {
            max_concurrent_probes: 2,
            max_probes_per_host: 1,
            head_timeout_secs: 2,
            range_timeout_secs: 2,
            ..ProbeConfig::default()
        };

        let started = Instant::now();
        let prober = StreamProber::new(build_http_client("test"), config);
        let results = prober.probe_batch(&channels).await;

        // With the host permit taken before the global one, the queued
        // second probe of the saturated host leaves a global slot free and
        // the healthy host is contacted right away.
        let first_hit = first_hit_rx.await.expect("fast host was contacted");
        let delay = first_hit - started;
        assert!(
            delay < Duration::from_millis(1500),
            "healthy host waited {delay:?} behind the saturated host"
        );

        assert_eq!(results.len(), 3);
        assert_eq!(results[2].status, StreamStatus::Live);
        assert_eq!(results[0].status, StreamStatus::Dead);
        assert_eq!(results[1].status, StreamStatus::Dead);
    }

    #[tokio::test]
    async fn test_response_time_excludes_body_drain() {
        // HEAD gets a 200 without a content type, which forces the ranged
        // fetch; the GET answers its status line immediately but dribbles
        // the body out after a pause longer than the slow threshold.
        let (listener, addr) = bind_local().await;
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 512];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if buf[..n].starts_with(b"HEAD") {
                    let _ = socket
                        .write_all(
                            b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\
                              Connection: close\r\n\r\n",
                        )
                        .await;
                } else {
                    let _ = socket
                        .write_all(
                            b"HTTP/1.1 206 Partial Content\r\n\
                              Content-Type: video/mp2t\r\nContent-Length: 4\r\n\
                              Connection: close\r\n\r\n",
                        )
                        .await;
                    let _ = socket.flush().await;
                    tokio::time::sleep(Duration::from_millis(800)).await;
                    let _ = socket.write_all(b"abcd").await;
                }
            }
        });

        let config = ProbeConfig {
            slow_threshold_ms: 500,
            ..quick_config()
        };
        let prober = StreamProber::new(build_http_client("test"), config);
        let results = prober
            .probe_batch(&[channel("Dribble", &format!("http://{addr}/a.ts"))])
            .await;

        assert_eq!(results.len(), 1);
        assert!(results[0].response_time_ms < 500, "drain time leaked into {}", results[0].response_time_ms);
        assert_eq!(results[0].status, StreamStatus::Live);
    }
}
