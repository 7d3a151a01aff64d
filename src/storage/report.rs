//! Daily probe reports
//!
//! One JSON file per UTC calendar day, named `YYYY-MM-DD.json`, holding the
//! full probe result array plus per-status summary counts. A later run on the
//! same day replaces the file.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::errors::StorageResult;
use crate::models::{ProbeReport, ProbeResult, ProbeSummary};
use crate::storage::store::write_atomic;

/// Writer for dated batch-probe reports
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the report file for a given UTC date
    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", date.format("%Y-%m-%d")))
    }

    /// Assemble and persist today's report from a batch of probe results
    pub fn write_daily(&self, results: Vec<ProbeResult>) -> StorageResult<ProbeReport> {
        let now = Utc::now();
        let report = ProbeReport {
            date: now.date_naive(),
            generated_at: now,
            summary: ProbeSummary::from_results(&results),
            results,
        };

        let path = self.report_path(report.date);
        let json = serde_json::to_string_pretty(&report)?;
        write_atomic(&path, json.as_bytes())?;
        debug!(
            "Wrote probe report for {} ({} results) to {}",
            report.date,
            report.results.len(),
            path.display()
        );
        Ok(report)
    }

    /// Load a previously written report, if one exists for the date
    pub fn load(&self, date: NaiveDate) -> StorageResult<Option<ProbeReport>> {
        let path = self.report_path(date);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }
}
