//! Task commands.

use crate::api::Task;
use crate::cli::args::TaskCommands;
use crate::cli::commands::Context;
use crate::error::BlitzError;
use crate::output::{format_task, format_tasks};
use crate::shell::Workspace;

/// Execute task subcommands
///
/// # Errors
///
/// Returns an error if not logged in, the API call fails, the project is
/// unknown or the title is blank.
pub async fn task(ctx: &Context, cmd: TaskCommands) -> Result<String, BlitzError> {
    ctx.require_auth()?;
    let api = ctx.client.as_ref();

    match cmd {
        TaskCommands::List { project } => {
            let mut workspace = Workspace::new();
            workspace.load(api).await?;
            workspace.select_project(project.as_deref())?;

            let title = workspace
                .current_project()
                .map_or_else(|| "Tasks".to_string(), |p| p.name.clone());
            let tasks: Vec<Task> = workspace.visible_tasks().into_iter().cloned().collect();
            format_tasks(&tasks, &title, ctx.format)
        }
        TaskCommands::Add {
            title,
            project,
            priority,
        } => {
            let mut workspace = Workspace::new();
            if project.is_some() {
                workspace.load(api).await?;
                workspace.select_project(project.as_deref())?;
            }
            let task = workspace.add_task(api, &title, priority).await?;
            format_task(&task, ctx.format)
        }
    }
}
