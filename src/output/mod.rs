//! Output formatting for blitz.
//!
//! Every command result is rendered either for a terminal or as JSON.

mod json;
mod pretty;

use crate::api::{Project, Task, User};
use crate::cli::args::OutputFormat;
use crate::error::BlitzError;

pub use json::*;
pub use pretty::*;

/// Format projects based on output format
///
/// # Errors
///
/// Returns `BlitzError::Parse` if JSON serialization fails.
pub fn format_projects(projects: &[Project], format: OutputFormat) -> Result<String, BlitzError> {
    match format {
        OutputFormat::Pretty => Ok(format_projects_pretty(projects)),
        OutputFormat::Json => format_projects_json(projects),
    }
}

/// Format a single project based on output format
///
/// # Errors
///
/// Returns `BlitzError::Parse` if JSON serialization fails.
pub fn format_project(project: &Project, format: OutputFormat) -> Result<String, BlitzError> {
    match format {
        OutputFormat::Pretty => Ok(format_project_pretty(project)),
        OutputFormat::Json => to_json(project),
    }
}

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `BlitzError::Parse` if JSON serialization fails.
pub fn format_tasks(tasks: &[Task], title: &str, format: OutputFormat) -> Result<String, BlitzError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `BlitzError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, format: OutputFormat) -> Result<String, BlitzError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format the signed-in user based on output format
///
/// # Errors
///
/// Returns `BlitzError::Parse` if JSON serialization fails.
pub fn format_user(user: &User, format: OutputFormat) -> Result<String, BlitzError> {
    match format {
        OutputFormat::Pretty => Ok(format_user_pretty(user)),
        OutputFormat::Json => to_json(user),
    }
}
