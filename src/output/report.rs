//! Run report
//!
//! Counts what happened to the discovered endpoint pages and when the run
//! started and finished.

use chrono::{DateTime, Duration, Utc};
use std::io::{self, Write};

/// Summary of one collection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// When the index page fetch started
    pub started_at: DateTime<Utc>,

    /// When the last endpoint page finished
    pub finished_at: DateTime<Utc>,

    /// Endpoint links found on the index page
    pub discovered: usize,

    /// Endpoint pages turned into records
    pub extracted: usize,

    /// Endpoint pages whose fetch failed and were left out
    pub skipped: usize,

    /// Records missing a method or URL
    pub incomplete: usize,

    /// SHA-256 of the configuration file, when one was loaded
    pub config_hash: Option<String>,
}

impl CrawlReport {
    /// Starts a report with every count at zero
    pub fn start() -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            discovered: 0,
            extracted: 0,
            skipped: 0,
            incomplete: 0,
            config_hash: None,
        }
    }

    /// Records the finish time
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    /// Wall-clock time between start and finish
    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }

    /// Renders the report as plain text
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("=== Collection Report ===\n\n");

        out.push_str("Run:\n");
        out.push_str(&format!("  Started: {}\n", self.started_at.to_rfc3339()));
        out.push_str(&format!("  Finished: {}\n", self.finished_at.to_rfc3339()));
        out.push_str(&format!(
            "  Duration: {:.1}s\n",
            self.duration().num_milliseconds() as f64 / 1000.0
        ));
        if let Some(hash) = &self.config_hash {
            out.push_str(&format!("  Config hash: {}\n", hash));
        }
        out.push('\n');

        out.push_str("Endpoint pages:\n");
        out.push_str(&format!("  Discovered: {}\n", self.discovered));
        out.push_str(&format!(
            "  Extracted: {} ({:.1}%)\n",
            self.extracted,
            percentage(self.extracted, self.discovered)
        ));
        out.push_str(&format!("  Skipped: {}\n", self.skipped));
        if self.incomplete > 0 {
            out.push_str(&format!("  Missing method or URL: {}\n", self.incomplete));
        }

        out
    }

    /// Logs a one-line summary
    pub fn log(&self) {
        tracing::info!(
            "Collected {} of {} endpoints ({} skipped, {} incomplete) in {}ms",
            self.extracted,
            self.discovered,
            self.skipped,
            self.incomplete,
            self.duration().num_milliseconds()
        );
    }
}

/// Logs the report and writes its text form to `out`
///
/// With `quiet` set only the log line is emitted, so the subscriber's level
/// decides whether anything shows.
pub fn write_report<W: Write>(report: &CrawlReport, quiet: bool, out: &mut W) -> io::Result<()> {
    report.log();
    if quiet {
        return Ok(());
    }
    out.write_all(report.render().as_bytes())
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
