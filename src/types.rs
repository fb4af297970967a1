//! Common types used throughout the exporter
//!
//! Records coming back from the analytics API are untyped: their shape
//! depends on the endpoint and group-by dimension. They are kept as JSON
//! objects and only resolved against a column schema when a report is
//! written.

use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// A single analytics row, keyed by field name
pub type Record = serde_json::Map<String, JsonValue>;

/// Header name to header value
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Column Schema
// ============================================================================

/// One CSV column: the record field it reads and the title it is written under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Key looked up in each record
    pub field: &'static str,
    /// Title written in the header row
    pub title: &'static str,
}

impl ColumnSpec {
    /// Create a column
    pub const fn new(field: &'static str, title: &'static str) -> Self {
        Self { field, title }
    }

    /// Render this column's cell for a record
    ///
    /// A missing field renders as an empty cell.
    pub fn cell(&self, record: &Record) -> String {
        record.get(self.field).map(render_scalar).unwrap_or_default()
    }
}

/// Render a JSON value as CSV cell text
///
/// Strings are written verbatim, numbers and booleans use their JSON text,
/// `null` becomes an empty cell, and nested values are written as compact JSON.
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!("Btn"), "Btn" ; "string")]
    #[test_case(json!(2), "2" ; "integer")]
    #[test_case(json!(1.5), "1.5" ; "float")]
    #[test_case(json!(true), "true" ; "boolean")]
    #[test_case(json!(null), "" ; "null")]
    #[test_case(json!(["a", 1]), r#"["a",1]"# ; "array")]
    fn test_render_scalar(value: Value, expected: &str) {
        assert_eq!(render_scalar(&value), expected);
    }

    #[test]
    fn test_column_cell_missing_field_is_empty() {
        let column = ColumnSpec::new("insertions", "Insertions");
        let record = json!({"week": "2024-01-01"});
        assert_eq!(column.cell(record.as_object().unwrap()), "");
    }

    #[test]
    fn test_column_cell_present_field() {
        let column = ColumnSpec::new("detachments", "Detachments");
        let record = json!({"detachments": 7});
        assert_eq!(column.cell(record.as_object().unwrap()), "7");
    }
}
