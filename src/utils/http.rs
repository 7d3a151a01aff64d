//! HTTP client construction
//!
//! One shared `reqwest::Client` is built per process and cloned into the
//! fetcher and prober; reqwest clients share their connection pool across
//! clones, which is what keeps the per-host probe cap meaningful.

use std::time::Duration;

use reqwest::Client;
use reqwest::redirect::Policy;

/// Build the shared HTTP client
///
/// Redirect following stays enabled: stream hosts routinely bounce through
/// tokenized redirect hops before the actual media endpoint. Only a connect
/// timeout is set here; total per-request budgets are applied per call site
/// because the probe phases carry different timeouts.
pub fn build_http_client(user_agent: &str) -> Client {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(5))
        .redirect(Policy::limited(5))
        .build()
        .unwrap_or_else(|_| Client::new())
}
