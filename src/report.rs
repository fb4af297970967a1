//! Built-in report definitions
//!
//! Each report ties one analytics query (endpoint + group-by dimension) to
//! one CSV file and its column schema.

use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::types::ColumnSpec;
use url::Url;

// ============================================================================
// Endpoints
// ============================================================================

/// Analytics endpoint family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Insertions and detachments over time
    Actions,
    /// Current instance counts
    Usages,
}

impl Endpoint {
    /// Path segment for this endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Actions => "actions",
            Endpoint::Usages => "usages",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Column Schemas
// ============================================================================

/// Columns of `actions_by_component.csv`
pub const ACTIONS_BY_COMPONENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("week", "Week"),
    ColumnSpec::new("component_key", "Component Key"),
    ColumnSpec::new("component_name", "Component Name"),
    ColumnSpec::new("detachments", "Detachments"),
    ColumnSpec::new("insertions", "Insertions"),
];

/// Columns of `actions_by_team.csv`
pub const ACTIONS_BY_TEAM_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("week", "Week"),
    ColumnSpec::new("team_name", "Team Name"),
    ColumnSpec::new("workspace_name", "Workspace Name"),
    ColumnSpec::new("detachments", "Detachments"),
    ColumnSpec::new("insertions", "Insertions"),
];

/// Columns of `usages_by_component.csv`
pub const USAGES_BY_COMPONENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("component_key", "Component Key"),
    ColumnSpec::new("component_name", "Component Name"),
    ColumnSpec::new("num_instances", "Number of Instances"),
    ColumnSpec::new("num_teams_using", "Number of Teams Using"),
    ColumnSpec::new("num_files_using", "Number of Files Using"),
];

/// Columns of `usages_by_file.csv`
pub const USAGES_BY_FILE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("team_name", "Team Name"),
    ColumnSpec::new("workspace_name", "Workspace Name"),
    ColumnSpec::new("file_name", "File Name"),
    ColumnSpec::new("num_instances", "Number of Instances"),
];

// ============================================================================
// Report Descriptors
// ============================================================================

/// One report: what to query and how to write it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportDescriptor {
    /// Endpoint family queried
    pub endpoint: Endpoint,
    /// `group_by` query parameter
    pub group_by: &'static str,
    /// Output file name without extension
    pub filename: &'static str,
    /// CSV columns, in output order
    pub columns: &'static [ColumnSpec],
}

/// The four reports produced by a default run, in run order
pub static STANDARD_REPORTS: [ReportDescriptor; 4] = [
    ReportDescriptor {
        endpoint: Endpoint::Actions,
        group_by: "component",
        filename: "actions_by_component",
        columns: ACTIONS_BY_COMPONENT_COLUMNS,
    },
    ReportDescriptor {
        endpoint: Endpoint::Actions,
        group_by: "team",
        filename: "actions_by_team",
        columns: ACTIONS_BY_TEAM_COLUMNS,
    },
    ReportDescriptor {
        endpoint: Endpoint::Usages,
        group_by: "component",
        filename: "usages_by_component",
        columns: USAGES_BY_COMPONENT_COLUMNS,
    },
    ReportDescriptor {
        endpoint: Endpoint::Usages,
        group_by: "file",
        filename: "usages_by_file",
        columns: USAGES_BY_FILE_COLUMNS,
    },
];

/// All built-in reports
pub fn standard_reports() -> &'static [ReportDescriptor] {
    &STANDARD_REPORTS
}

/// Look up a built-in report by file name
pub fn find_report(name: &str) -> Option<&'static ReportDescriptor> {
    let name = name.strip_suffix(".csv").unwrap_or(name);
    STANDARD_REPORTS.iter().find(|r| r.filename == name)
}

impl ReportDescriptor {
    /// Report name (the output file name without extension)
    pub fn name(&self) -> &'static str {
        self.filename
    }

    /// Column titles in output order
    pub fn titles(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.title).collect()
    }

    /// Query URL for the first page of this report
    ///
    /// `<base>/<file_key>/<endpoint>?group_by=..&start_date=..&end_date=..&order=asc`
    pub fn query_url(&self, config: &AnalyticsConfig) -> Result<Url> {
        let mut url = config.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| Error::config(format!("'{}' cannot be a base URL", config.base_url)))?
            .pop_if_empty()
            .push(&config.file_key)
            .push(self.endpoint.as_str());

        url.query_pairs_mut()
            .clear()
            .append_pair("group_by", self.group_by)
            .append_pair("start_date", &config.start_date.to_string())
            .append_pair("end_date", &config.end_date.to_string())
            .append_pair("order", "asc");

        Ok(url)
    }
}
