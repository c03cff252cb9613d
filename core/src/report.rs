//! Summary Report schema
//!
//! Parses sanitized model output into a typed report. Validation is strict:
//! required keys must be present with exact types, and nothing is coerced
//! (silent coercion would mask model drift that operators need to see).
//! Unknown extra top-level keys are ignored (forward compatibility).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry in the chronological activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogItem {
    /// ISO-8601 date string, or the literal "N/A"
    pub date: String,
    /// Client-facing description, free of technical jargon
    pub description: String,
    /// Open-ended, e.g. "Planning", "Development", "Review"
    pub category: String,
}

/// Structured project summary produced by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub project_name: String,
    /// High-level, formal paragraph summarizing current state for a client
    pub executive_summary: String,
    pub activity_log: Vec<ActivityLogItem>,
    pub pending_action_items: Vec<String>,
}

/// Errors from report parsing and validation
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON syntax error: {0}")]
    Syntax(String),

    #[error("Schema violation at '{field}': expected {expected}, got {actual}")]
    Schema {
        field: String,
        expected: &'static str,
        actual: String,
    },
}

/// Parse candidate text into a validated `SummaryReport`.
///
/// Syntax failures and schema failures are distinct error kinds; a schema
/// failure names the first offending field path.
pub fn parse_report(candidate: &str) -> Result<SummaryReport, ParseError> {
    let value: Value =
        serde_json::from_str(candidate).map_err(|e| ParseError::Syntax(e.to_string()))?;

    let obj = value
        .as_object()
        .ok_or_else(|| schema_error("$", "object", &value))?;

    let project_name = require_string(obj, "project_name")?;
    let executive_summary = require_string(obj, "executive_summary")?;

    let log_items = require_array(obj, "activity_log")?;
    let mut activity_log = Vec::with_capacity(log_items.len());
    for (idx, item) in log_items.iter().enumerate() {
        let path = format!("activity_log[{}]", idx);
        let entry = item
            .as_object()
            .ok_or_else(|| schema_error(&path, "object", item))?;
        activity_log.push(ActivityLogItem {
            date: require_nested_string(entry, &path, "date")?,
            description: require_nested_string(entry, &path, "description")?,
            category: require_nested_string(entry, &path, "category")?,
        });
    }

    let action_items = require_array(obj, "pending_action_items")?;
    let mut pending_action_items = Vec::with_capacity(action_items.len());
    for (idx, item) in action_items.iter().enumerate() {
        let s = item.as_str().ok_or_else(|| {
            schema_error(&format!("pending_action_items[{}]", idx), "string", item)
        })?;
        pending_action_items.push(s.to_string());
    }

    Ok(SummaryReport {
        project_name,
        executive_summary,
        activity_log,
        pending_action_items,
    })
}

fn schema_error(field: &str, expected: &'static str, actual: &Value) -> ParseError {
    ParseError::Schema {
        field: field.to_string(),
        expected,
        actual: type_name(actual).to_string(),
    }
}

fn missing(field: String, expected: &'static str) -> ParseError {
    ParseError::Schema {
        field,
        expected,
        actual: "missing".to_string(),
    }
}

fn require_string(
    obj: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<String, ParseError> {
    match obj.get(field) {
        None => Err(missing(field.to_string(), "string")),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(schema_error(field, "string", other)),
    }
}

fn require_nested_string(
    obj: &serde_json::Map<String, Value>,
    path: &str,
    field: &str,
) -> Result<String, ParseError> {
    let full = format!("{}.{}", path, field);
    match obj.get(field) {
        None => Err(missing(full, "string")),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(schema_error(&full, "string", other)),
    }
}

fn require_array<'a>(
    obj: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Result<&'a Vec<Value>, ParseError> {
    match obj.get(field) {
        None => Err(missing(field.to_string(), "array")),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(schema_error(field, "array", other)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
