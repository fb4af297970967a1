// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]

//! # Figma Library Analytics Exporter
//!
//! Pulls usage and action analytics for a Figma design-library file from the
//! Library Analytics REST API and writes them as CSV reports.
//!
//! ## Reports
//!
//! | File | Query |
//! |---|---|
//! | `actions_by_component.csv` | `actions?group_by=component` |
//! | `actions_by_team.csv` | `actions?group_by=team` |
//! | `usages_by_component.csv` | `usages?group_by=component` |
//! | `usages_by_file.csv` | `usages?group_by=file` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use figma_library_analytics::{
//!     AnalyticsConfig, HttpClient, ReportEngine, Result, STANDARD_REPORTS,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AnalyticsConfig::from_env()?;
//!     let engine = ReportEngine::new(HttpClient::new()?, config);
//!     let stats = engine.run(&STANDARD_REPORTS).await?;
//!     println!("{} reports written", stats.reports_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  ReportEngine (sequential)                   │
//! │      for each report: query_url → fetch_all → write CSV      │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────┬─────────────────┴─────┬──────────────────────────┐
//! │  Config   │  HTTP + Pagination    │  Output                  │
//! ├───────────┼───────────────────────┼──────────────────────────┤
//! │ env/.env  │ X-FIGMA-TOKEN header  │ <output>/<report>.csv    │
//! │ dates     │ cursor / next_page    │ header row + data rows   │
//! └───────────┴───────────────────────┴──────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Runtime configuration
pub mod config;

/// HTTP client
pub mod http;

/// Cursor pagination
pub mod pagination;

/// CSV output
pub mod output;

/// Built-in report definitions
pub mod report;

/// Sequential report engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::AnalyticsConfig;
pub use engine::{ReportEngine, RunStats};
pub use error::{Error, Result};
pub use http::{HttpClient, PageFetcher};
pub use report::{standard_reports, ReportDescriptor, STANDARD_REPORTS};
pub use types::*;
