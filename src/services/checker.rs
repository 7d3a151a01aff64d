//! Check run orchestration
//!
//! Drives one probe cycle: load the persisted channel set, fan out the probe
//! batch, fold the outcomes back into each channel's health score and
//! `last_seen`, then persist the updated set and the daily report. Score
//! mutation happens only after every probe has completed, applied
//! sequentially; there is no concurrent writer.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::models::ProbeSummary;
use crate::probe::{apply_probe_result, StreamProber};
use crate::storage::{ChannelStore, ReportWriter};

/// Probe cycle service
pub struct CheckerService {
    prober: StreamProber,
}

impl CheckerService {
    pub fn new(prober: StreamProber) -> Self {
        Self { prober }
    }

    /// Run one full probe cycle against the persisted channel set
    ///
    /// Fails only when there is nothing to probe; individual channel failures
    /// are folded into their results.
    pub async fn run(&self, store: &ChannelStore, reports: &ReportWriter) -> AppResult<ProbeSummary> {
        let mut channels = store.load().map_err(AppError::Storage)?;
        if channels.is_empty() {
            return Err(AppError::run_failed(format!(
                "no channels to probe in {}",
                store.path().display()
            )));
        }

        info!("Probing {} channels", channels.len());
        let results = self.prober.probe_batch(&channels).await;

        let by_id: HashMap<&str, &crate::models::ProbeResult> =
            results.iter().map(|r| (r.channel_id.as_str(), r)).collect();
        for channel in &mut channels {
            match by_id.get(channel.id.as_str()) {
                Some(result) => apply_probe_result(channel, result),
                None => warn!("No probe result for channel {}", channel.id),
            }
        }

        // Store first: the report must never reflect score deltas that were
        // not persisted.
        store.save(&channels).map_err(AppError::Storage)?;
        let report = reports.write_daily(results).map_err(AppError::Storage)?;

        info!(
            "Probe cycle complete: {} live, {} slow, {} unstable, {} dead",
            report.summary.live, report.summary.slow, report.summary.unstable, report.summary.dead
        );
        Ok(report.summary)
    }
}
