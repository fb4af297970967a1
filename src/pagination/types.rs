//! Pagination types
//!
//! Defines the page envelope returned by the analytics API and the state
//! carried between requests.

use crate::error::{Error, Result};
use crate::types::Record;
use serde::Deserialize;
use serde_json::Value;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available, request the next one with this cursor
    Continue {
        /// Cursor to echo back
        cursor: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// One page of an analytics response
///
/// Action endpoints return `rows`; usage endpoints return `components` or
/// `files` depending on the group-by dimension.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageResponse {
    /// Records of `actions` responses
    #[serde(default)]
    pub rows: Option<Vec<Record>>,
    /// Records of `usages?group_by=component` responses
    #[serde(default)]
    pub components: Option<Vec<Record>>,
    /// Records of `usages?group_by=file` responses
    #[serde(default)]
    pub files: Option<Vec<Record>>,
    /// Whether another page follows
    #[serde(default)]
    pub next_page: Option<bool>,
    /// Cursor for the following page
    #[serde(default)]
    pub cursor: Option<String>,
}

impl PageResponse {
    /// Decode a page from a JSON body
    pub fn from_json(body: Value) -> Result<Self> {
        if !body.is_object() {
            return Err(Error::decode(format!(
                "expected a JSON object page, got {}",
                json_kind(&body)
            )));
        }
        serde_json::from_value(body).map_err(|e| Error::decode(format!("invalid page: {e}")))
    }

    /// Whether the server declared another page
    pub fn has_next_page(&self) -> bool {
        self.next_page.unwrap_or(false)
    }

    /// Number of records on this page
    pub fn record_count(&self) -> usize {
        self.collection().map_or(0, Vec::len)
    }

    /// Take the records out of whichever collection is present
    ///
    /// `rows` wins over `components`, which wins over `files`. A page with
    /// none of them contributes no records.
    pub fn into_records(self) -> Vec<Record> {
        self.rows
            .or(self.components)
            .or(self.files)
            .unwrap_or_default()
    }

    fn collection(&self) -> Option<&Vec<Record>> {
        self.rows
            .as_ref()
            .or(self.components.as_ref())
            .or(self.files.as_ref())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Cursor for the next request
    pub cursor: Option<String>,
    /// Pages fetched so far
    pub pages_fetched: usize,
    /// Total records fetched so far
    pub total_fetched: usize,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the cursor after the last page
    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    /// Record a fetched page
    pub fn add_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.total_fetched += records;
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }
}
