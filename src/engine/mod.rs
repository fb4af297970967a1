//! Execution engine module
//!
//! Runs reports one after another.
//!
//! # Overview
//!
//! For each report, in order: build the query URL, fetch every page, write
//! the CSV. The next report does not start until the previous file is
//! written. The first failure stops the run; files already written stay on
//! disk.

mod types;

pub use types::{ReportOutcome, RunStats};

use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::http::PageFetcher;
use crate::output::CsvReportWriter;
use crate::pagination::CursorPaginator;
use crate::report::ReportDescriptor;
use std::time::Instant;
use tracing::{error, info};

/// Report engine
pub struct ReportEngine<F: PageFetcher> {
    /// Page source
    fetcher: F,
    /// Run configuration
    config: AnalyticsConfig,
    /// Paginator shared by all reports
    paginator: CursorPaginator,
    /// CSV writer rooted at the output directory
    writer: CsvReportWriter,
}

impl<F: PageFetcher> ReportEngine<F> {
    /// Create a new engine
    pub fn new(fetcher: F, config: AnalyticsConfig) -> Self {
        let paginator = CursorPaginator::new(config.max_pages);
        let writer = CsvReportWriter::new(config.output_dir.clone());
        Self {
            fetcher,
            config,
            paginator,
            writer,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Get the page source
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Run `reports` in order, stopping at the first failure
    ///
    /// A failure is returned as [`Error::ReportFailed`] carrying the 1-based
    /// position of the failing report.
    pub async fn run(&self, reports: &[ReportDescriptor]) -> Result<RunStats> {
        let start = Instant::now();
        let mut stats = RunStats::new();

        info!(
            "Exporting {} reports for file {} ({} to {})",
            reports.len(),
            self.config.file_key,
            self.config.start_date,
            self.config.end_date
        );

        for (i, report) in reports.iter().enumerate() {
            match self.run_report(report).await {
                Ok(outcome) => stats.add_outcome(outcome),
                Err(e) => {
                    let err = Error::report_failed(i + 1, report.name(), e);
                    error!(
                        "{err}; skipping {} remaining report(s)",
                        reports.len() - i - 1
                    );
                    return Err(err);
                }
            }
        }

        stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Completed export: {} reports, {} rows, {} pages in {}ms",
            stats.reports_written, stats.records_written, stats.pages_fetched, stats.duration_ms
        );
        Ok(stats)
    }

    /// Fetch and write a single report
    pub async fn run_report(&self, report: &ReportDescriptor) -> Result<ReportOutcome> {
        info!("Starting report: {}", report.name());

        let url = report.query_url(&self.config)?;
        let headers = self.config.auth_headers();

        let (records, state) = self
            .paginator
            .fetch_pages(&self.fetcher, &url, &headers)
            .await?;

        let summary = self
            .writer
            .write(&records, report.filename, report.columns)?;

        Ok(ReportOutcome {
            report: report.name().to_string(),
            path: summary.path,
            rows: summary.rows,
            pages: state.pages_fetched,
        })
    }
}

#[cfg(test)]
mod tests;
