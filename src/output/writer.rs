//! CSV report writer
//!
//! Serializes records against a column schema with the `csv` crate, which
//! takes care of quoting fields containing commas, quotes or newlines.

use crate::error::{Result, ResultExt};
use crate::types::{ColumnSpec, Record};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of writing one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// File that was written
    pub path: PathBuf,
    /// Data rows written (header excluded)
    pub rows: usize,
}

/// Writes reports as `<output_dir>/<filename>.csv`
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    output_dir: PathBuf,
}

impl CsvReportWriter {
    /// Create a writer rooted at `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory reports are written into
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a report named `filename` is written to
    pub fn report_path(&self, filename: &str) -> PathBuf {
        self.output_dir.join(format!("{filename}.csv"))
    }

    /// Write `records` to `<output_dir>/<filename>.csv`, replacing any existing file
    ///
    /// The output directory is created when missing.
    pub fn write(
        &self,
        records: &[Record],
        filename: &str,
        columns: &[ColumnSpec],
    ) -> Result<WriteSummary> {
        let path = self.report_path(filename);
        let display = path.display().to_string();

        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "failed to create directory {} for {display}",
                self.output_dir.display()
            )
        })?;

        let file =
            fs::File::create(&path).with_context(|| format!("failed to create {display}"))?;

        let rows = write_csv(file, records, columns)
            .with_context(|| format!("failed to write {display}"))?;

        info!("Wrote {} rows to {}", rows, path.display());
        Ok(WriteSummary { path, rows })
    }
}

/// Write a header row and one row per record to any sink
///
/// Returns the number of data rows written.
pub(crate) fn write_csv<W: Write>(
    sink: W,
    records: &[Record],
    columns: &[ColumnSpec],
) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(sink);

    writer.write_record(columns.iter().map(|c| c.title))?;

    for record in records {
        writer.write_record(columns.iter().map(|c| c.cell(record)))?;
    }

    writer.flush()?;
    Ok(records.len())
}
