//! Tests for engine module

use super::*;
use crate::error::Stage;
use crate::report::{find_report, STANDARD_REPORTS};
use crate::types::StringMap;
use async_trait::async_trait;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;
use url::Url;

/// Answers by endpoint path and `group_by`, failing for one chosen report
struct RoutedFetcher {
    fail_on: Option<&'static str>,
    calls: Mutex<Vec<Url>>,
    headers: Mutex<Vec<StringMap>>,
}

impl RoutedFetcher {
    fn new() -> Self {
        Self {
            fail_on: None,
            calls: Mutex::new(Vec::new()),
            headers: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(report: &'static str) -> Self {
        Self {
            fail_on: Some(report),
            ..Self::new()
        }
    }

    fn reports_requested(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(report_name).collect()
    }
}

fn report_name(url: &Url) -> String {
    let endpoint = url.path_segments().unwrap().last().unwrap().to_string();
    let group_by = url
        .query_pairs()
        .find(|(k, _)| k == "group_by")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    format!("{endpoint}_by_{group_by}")
}

#[async_trait]
impl PageFetcher for RoutedFetcher {
    async fn fetch_page(&self, url: &Url, headers: &StringMap) -> Result<Value> {
        self.calls.lock().unwrap().push(url.clone());
        self.headers.lock().unwrap().push(headers.clone());

        let name = report_name(url);
        if self.fail_on == Some(name.as_str()) {
            return Err(Error::http_status(500, "upstream exploded"));
        }

        let has_cursor = url.query_pairs().any(|(k, _)| k == "cursor");
        let body = match (name.as_str(), has_cursor) {
            ("actions_by_component", false) => json!({
                "rows": [{"week": "2024-01-01", "component_key": "k1", "component_name": "Btn", "detachments": 2, "insertions": 5}],
                "next_page": true,
                "cursor": "page2"
            }),
            ("actions_by_component", true) => json!({
                "rows": [{"week": "2024-01-08", "component_key": "k1", "component_name": "Btn", "detachments": 0, "insertions": 3}],
                "next_page": false
            }),
            ("actions_by_team", _) => json!({
                "rows": [{"week": "2024-01-01", "team_name": "Core", "workspace_name": "Acme", "detachments": 1, "insertions": 9}],
                "next_page": false
            }),
            ("usages_by_component", _) => json!({
                "components": [{"component_key": "k1", "component_name": "Btn", "num_instances": 40, "num_teams_using": 3, "num_files_using": 12}],
                "next_page": false
            }),
            ("usages_by_file", _) => json!({
                "files": [{"team_name": "Core", "workspace_name": "Acme", "file_name": "Checkout", "num_instances": 7}],
                "next_page": false
            }),
            _ => json!({"next_page": false}),
        };
        Ok(body)
    }
}

fn config(output_dir: &std::path::Path) -> AnalyticsConfig {
    AnalyticsConfig::new(
        "figd_secret",
        "LIB",
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
    )
    .unwrap()
    .with_output_dir(output_dir)
}

// ============================================================================
// RunStats Tests
// ============================================================================

#[test]
fn test_run_stats_accumulate() {
    let mut stats = RunStats::new();
    stats.add_outcome(ReportOutcome {
        report: "a".into(),
        path: "a.csv".into(),
        rows: 3,
        pages: 2,
    });
    stats.add_outcome(ReportOutcome {
        report: "b".into(),
        path: "b.csv".into(),
        rows: 4,
        pages: 1,
    });

    assert_eq!(stats.reports_written, 2);
    assert_eq!(stats.records_written, 7);
    assert_eq!(stats.pages_fetched, 3);
    assert_eq!(stats.outcomes.len(), 2);
}

// ============================================================================
// ReportEngine Tests
// ============================================================================

#[tokio::test]
async fn test_run_writes_all_reports_in_order() {
    let dir = tempdir().unwrap();
    let engine = ReportEngine::new(RoutedFetcher::new(), config(dir.path()));

    let stats = engine.run(&STANDARD_REPORTS).await.unwrap();

    assert_eq!(stats.reports_written, 4);
    assert_eq!(stats.records_written, 5);
    assert_eq!(stats.pages_fetched, 5);
    assert_eq!(
        engine.fetcher().reports_requested(),
        vec![
            "actions_by_component",
            "actions_by_component",
            "actions_by_team",
            "usages_by_component",
            "usages_by_file"
        ]
    );

    let content = fs::read_to_string(dir.path().join("actions_by_component.csv")).unwrap();
    assert_eq!(
        content,
        "Week,Component Key,Component Name,Detachments,Insertions\n\
         2024-01-01,k1,Btn,2,5\n\
         2024-01-08,k1,Btn,0,3\n"
    );

    let content = fs::read_to_string(dir.path().join("usages_by_component.csv")).unwrap();
    assert_eq!(
        content,
        "Component Key,Component Name,Number of Instances,Number of Teams Using,Number of Files Using\n\
         k1,Btn,40,3,12\n"
    );
}

#[tokio::test]
async fn test_every_request_carries_token_header() {
    let dir = tempdir().unwrap();
    let engine = ReportEngine::new(RoutedFetcher::new(), config(dir.path()));

    engine.run(&STANDARD_REPORTS).await.unwrap();

    let headers = engine.fetcher().headers.lock().unwrap();
    assert_eq!(headers.len(), 5);
    for h in headers.iter() {
        assert_eq!(h.get("X-FIGMA-TOKEN").map(String::as_str), Some("figd_secret"));
    }
}

#[tokio::test]
async fn test_failure_on_second_report_aborts_run() {
    let dir = tempdir().unwrap();
    let engine = ReportEngine::new(
        RoutedFetcher::failing_on("actions_by_team"),
        config(dir.path()),
    );

    let err = engine.run(&STANDARD_REPORTS).await.unwrap_err();

    match &err {
        Error::ReportFailed {
            index,
            report,
            stage,
            ..
        } => {
            assert_eq!(*index, 2);
            assert_eq!(report, "actions_by_team");
            assert_eq!(*stage, Stage::Fetch);
        }
        other => panic!("Expected ReportFailed, got {other:?}"),
    }

    let requested = engine.fetcher().reports_requested();
    assert!(!requested.iter().any(|r| r.starts_with("usages")));

    let first = fs::read_to_string(dir.path().join("actions_by_component.csv")).unwrap();
    assert_eq!(first.lines().count(), 3);
    assert!(!dir.path().join("actions_by_team.csv").exists());
    assert!(!dir.path().join("usages_by_component.csv").exists());
}

#[tokio::test]
async fn test_write_failure_aborts_before_next_fetch() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("output");
    fs::write(&blocker, "not a directory").unwrap();

    let engine = ReportEngine::new(RoutedFetcher::new(), config(&blocker));
    let err = engine.run(&STANDARD_REPORTS).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Write);
    assert!(matches!(err, Error::ReportFailed { index: 1, .. }));
    assert!(err.to_string().contains("actions_by_component.csv"));
    assert!(!engine
        .fetcher()
        .reports_requested()
        .iter()
        .any(|r| r == "actions_by_team"));
}

#[tokio::test]
async fn test_run_report_single() {
    let dir = tempdir().unwrap();
    let engine = ReportEngine::new(RoutedFetcher::new(), config(dir.path()));
    let report = find_report("usages_by_file").unwrap();

    let outcome = engine.run_report(report).await.unwrap();

    assert_eq!(outcome.report, "usages_by_file");
    assert_eq!(outcome.rows, 1);
    assert_eq!(outcome.pages, 1);
    assert_eq!(outcome.path, dir.path().join("usages_by_file.csv"));
}

#[tokio::test]
async fn test_run_subset_keeps_given_order() {
    let dir = tempdir().unwrap();
    let engine = ReportEngine::new(RoutedFetcher::new(), config(dir.path()));
    let subset = [STANDARD_REPORTS[3], STANDARD_REPORTS[1]];

    let stats = engine.run(&subset).await.unwrap();

    assert_eq!(stats.reports_written, 2);
    assert_eq!(
        engine.fetcher().reports_requested(),
        vec!["usages_by_file", "actions_by_team"]
    );
}
