//! Project commands.

use crate::cli::args::ProjectCommands;
use crate::cli::commands::Context;
use crate::core::WorkspaceApi;
use crate::error::BlitzError;
use crate::output::{format_project, format_projects};
use crate::shell::Workspace;

/// Execute project subcommands
///
/// # Errors
///
/// Returns an error if not logged in, the API call fails or the name is blank.
pub async fn project(ctx: &Context, cmd: ProjectCommands) -> Result<String, BlitzError> {
    ctx.require_auth()?;

    match cmd {
        ProjectCommands::List => {
            let projects = ctx.client.list_projects().await?;
            format_projects(&projects, ctx.format)
        }
        ProjectCommands::Add { name } => {
            let mut workspace = Workspace::new();
            let project = workspace.add_project(ctx.client.as_ref(), &name).await?;
            format_project(&project, ctx.format)
        }
    }
}
