//! Output module
//!
//! Writes fetched records as CSV reports.
//!
//! # Overview
//!
//! A report is a header row of column titles followed by one row per
//! record. Columns come from the report's schema, not from the records:
//! missing fields become empty cells and fields outside the schema are
//! dropped.

mod writer;

pub use writer::{CsvReportWriter, WriteSummary};
