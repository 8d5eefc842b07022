//! JSON output formatting for blitz.

use serde::Serialize;
use serde_json::json;

use crate::api::{Project, Task};
use crate::error::BlitzError;

/// Format projects as JSON
///
/// # Errors
///
/// Returns `BlitzError::Parse` if JSON serialization fails.
pub fn format_projects_json(projects: &[Project]) -> Result<String, BlitzError> {
    let output = json!({
        "count": projects.len(),
        "items": projects
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `BlitzError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], list_name: &str) -> Result<String, BlitzError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `BlitzError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, BlitzError> {
    Ok(serde_json::to_string_pretty(value)?)
}
