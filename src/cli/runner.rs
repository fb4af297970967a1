//! CLI runner - executes the export

use crate::cli::commands::Cli;
use crate::config::{AnalyticsConfig, ENV_END_DATE, ENV_FILE_KEY, ENV_START_DATE};
use crate::engine::{ReportEngine, RunStats};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::report::{find_report, standard_reports, ReportDescriptor};
use crate::types::StringMap;
use std::fmt::Write as _;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        if self.cli.list {
            print!("{}", render_report_list(standard_reports()));
            return Ok(());
        }

        let reports = self.selected_reports()?;
        let config = AnalyticsConfig::from_env_with(&self.overrides())?;
        let config = self.apply_typed_overrides(config)?;
        tracing::debug!("Configuration: {config:?}");

        let client = HttpClient::with_config(
            HttpClientConfig::builder().timeout(config.timeout).build(),
        )?;
        let engine = ReportEngine::new(client, config);

        let stats = engine.run(&reports).await?;
        print!("{}", render_summary(&stats));
        Ok(())
    }

    /// Config values given on the command line, keyed by environment variable
    pub fn overrides(&self) -> StringMap {
        let mut overrides = StringMap::new();
        if let Some(key) = &self.cli.file_key {
            overrides.insert(ENV_FILE_KEY.to_string(), key.clone());
        }
        if let Some(date) = &self.cli.start_date {
            overrides.insert(ENV_START_DATE.to_string(), date.clone());
        }
        if let Some(date) = &self.cli.end_date {
            overrides.insert(ENV_END_DATE.to_string(), date.clone());
        }
        overrides
    }

    /// Apply flags whose values are already typed, bypassing string lookup
    pub fn apply_typed_overrides(&self, mut config: AnalyticsConfig) -> Result<AnalyticsConfig> {
        if let Some(dir) = &self.cli.output_dir {
            config = config.with_output_dir(dir.clone());
        }
        if let Some(max) = self.cli.max_pages {
            config = config.with_max_pages(max)?;
        }
        Ok(config)
    }

    /// Reports to run, in table order
    ///
    /// No `--report` flag means every built-in report.
    pub fn selected_reports(&self) -> Result<Vec<ReportDescriptor>> {
        if self.cli.reports.is_empty() {
            return Ok(standard_reports().to_vec());
        }

        for name in &self.cli.reports {
            if find_report(name).is_none() {
                let known: Vec<&str> = standard_reports().iter().map(|r| r.name()).collect();
                return Err(Error::invalid_value(
                    "--report",
                    format!("unknown report '{name}' (expected one of: {})", known.join(", ")),
                ));
            }
        }

        Ok(standard_reports()
            .iter()
            .filter(|r| {
                self.cli
                    .reports
                    .iter()
                    .filter_map(|name| find_report(name))
                    .any(|selected| selected.name() == r.name())
            })
            .copied()
            .collect())
    }
}

/// Table of built-in reports for `--list`
fn render_report_list(reports: &[ReportDescriptor]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(
            out,
            "{:<22} {}?group_by={:<10} {}",
            report.name(),
            report.endpoint,
            report.group_by,
            report.titles().join(", ")
        );
    }
    out
}

/// One line per written report
fn render_summary(stats: &RunStats) -> String {
    let mut out = String::new();
    for outcome in &stats.outcomes {
        let _ = writeln!(
            out,
            "Wrote {} ({} rows, {} pages)",
            outcome.path.display(),
            outcome.rows,
            outcome.pages
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ReportOutcome;
    use chrono::NaiveDate;
    use clap::Parser;
    use std::path::PathBuf;
    use pretty_assertions::assert_eq;

    fn runner(args: &[&str]) -> Runner {
        let mut argv = vec!["figma-library-analytics"];
        argv.extend_from_slice(args);
        Runner::new(Cli::parse_from(argv))
    }

    #[test]
    fn test_no_flags_selects_all_reports() {
        let selected = runner(&[]).selected_reports().unwrap();
        assert_eq!(selected.len(), 4);
        assert!(runner(&[]).overrides().is_empty());
    }

    #[test]
    fn test_report_selection_keeps_table_order() {
        let selected = runner(&["--report", "usages_by_file", "-r", "actions_by_team.csv"])
            .selected_reports()
            .unwrap();
        let names: Vec<&str> = selected.iter().map(ReportDescriptor::name).collect();
        assert_eq!(names, vec!["actions_by_team", "usages_by_file"]);
    }

    #[test]
    fn test_unknown_report_rejected() {
        let err = runner(&["--report", "usages_by_week"])
            .selected_reports()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
        assert!(err.to_string().contains("usages_by_week"));
    }

    #[test]
    fn test_overrides_keyed_by_env_name() {
        let overrides = runner(&[
            "--file-key",
            "KEY",
            "--start-date",
            "2024-02-01",
            "--end-date",
            "2024-02-29",
        ])
        .overrides();

        assert_eq!(overrides.get(ENV_FILE_KEY).map(String::as_str), Some("KEY"));
        assert_eq!(overrides.get(ENV_START_DATE).map(String::as_str), Some("2024-02-01"));
        assert_eq!(overrides.get(ENV_END_DATE).map(String::as_str), Some("2024-02-29"));
        assert_eq!(overrides.len(), 3);
    }

    fn base_config() -> AnalyticsConfig {
        AnalyticsConfig::new(
            "token",
            "KEY",
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_typed_overrides_pass_output_dir_through() {
        let runner = runner(&["--output-dir", "  spaced reports ", "--max-pages", "9"]);
        assert!(runner.overrides().is_empty());

        let config = runner.apply_typed_overrides(base_config()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("  spaced reports "));
        assert_eq!(config.max_pages, 9);
    }

    #[test]
    fn test_zero_max_pages_flag_rejected() {
        let err = runner(&["--max-pages", "0"])
            .apply_typed_overrides(base_config())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_render_report_list() {
        let out = render_report_list(standard_reports());
        assert_eq!(out.lines().count(), 4);
        assert!(out.lines().next().unwrap().starts_with("actions_by_component"));
        assert!(out.contains("usages?group_by=file"));
    }

    #[test]
    fn test_render_summary() {
        let mut stats = RunStats::new();
        stats.add_outcome(ReportOutcome {
            report: "usages_by_file".into(),
            path: "output/usages_by_file.csv".into(),
            rows: 12,
            pages: 2,
        });
        assert_eq!(
            render_summary(&stats),
            "Wrote output/usages_by_file.csv (12 rows, 2 pages)\n"
        );
    }

    #[tokio::test]
    async fn test_list_needs_no_configuration() {
        assert!(runner(&["--list"]).run().await.is_ok());
    }
}
