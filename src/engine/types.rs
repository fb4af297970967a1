//! Engine types
//!
//! Per-report outcomes and run statistics.

use std::path::PathBuf;

/// Result of one successfully written report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Report name
    pub report: String,
    /// CSV file written
    pub path: PathBuf,
    /// Data rows written
    pub rows: usize,
    /// Pages fetched from the API
    pub pages: usize,
}

/// Statistics from a run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Reports written
    pub reports_written: usize,
    /// Total rows written across reports
    pub records_written: usize,
    /// Total pages fetched across reports
    pub pages_fetched: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Outcomes in run order
    pub outcomes: Vec<ReportOutcome>,
}

impl RunStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a written report
    pub fn add_outcome(&mut self, outcome: ReportOutcome) {
        self.reports_written += 1;
        self.records_written += outcome.rows;
        self.pages_fetched += outcome.pages;
        self.outcomes.push(outcome);
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
