//! Login, logout and whoami.

use colored::Colorize;

use crate::api::{self, Credentials, User};
use crate::cli::args::{LoginArgs, OutputFormat};
use crate::cli::commands::Context;
use crate::core::WorkspaceApi;
use crate::error::BlitzError;
use crate::output::{format_user, to_json};

/// Pick the credentials for a login.
///
/// Explicit email and password win. Without them the demo identity from the
/// config is used. `--demo` allows registering a missing account.
#[must_use]
pub fn credentials_for(args: &LoginArgs, ctx: &Context) -> Credentials {
    let mut credentials = match (&args.email, &args.password) {
        (Some(email), Some(password)) => Credentials::new(email.as_str(), password.as_str()),
        _ => Credentials::demo(&ctx.config.demo),
    };
    credentials.register_if_missing = args.demo;
    if credentials.name.is_none() {
        credentials.name = Some(ctx.config.demo.name.clone());
    }
    credentials
}

/// Execute login command
///
/// # Errors
///
/// Returns an error if the login is refused, the server cannot be reached
/// or the token cannot be stored.
pub async fn login(ctx: &Context, args: &LoginArgs) -> Result<String, BlitzError> {
    let credentials = credentials_for(args, ctx);
    let response = api::login(ctx.client.as_ref(), &credentials).await?;

    ctx.tokens.store(&response.token)?;
    let user = response.user.unwrap_or_else(|| User {
        email: Some(credentials.email.clone()),
        ..User::default()
    });
    ctx.tokens.store_user(&user)?;

    match ctx.format {
        OutputFormat::Json => to_json(&user),
        OutputFormat::Pretty => Ok(format!(
            "{} Logged in as {}",
            "✓".green(),
            user.name
                .as_deref()
                .or(user.email.as_deref())
                .unwrap_or(&credentials.email)
                .bold()
        )),
    }
}

/// Execute logout command
///
/// # Errors
///
/// Returns an error if the stored token cannot be removed.
pub fn logout(ctx: &Context) -> Result<String, BlitzError> {
    let was_logged_in = ctx.client.is_authenticated();
    ctx.tokens.clear()?;
    ctx.client.set_token(None);

    Ok(match ctx.format {
        OutputFormat::Json => serde_json::json!({ "logged_out": was_logged_in }).to_string(),
        OutputFormat::Pretty if was_logged_in => format!("{} Logged out", "✓".green()),
        OutputFormat::Pretty => "Not logged in".to_string(),
    })
}

/// Execute whoami command
///
/// The token is checked against the server before the profile is shown.
///
/// # Errors
///
/// Returns `NotAuthenticated` without a token, or the server's rejection.
pub async fn whoami(ctx: &Context) -> Result<String, BlitzError> {
    ctx.require_auth()?;
    ctx.client.list_projects().await?;

    let user = ctx.tokens.load_user().unwrap_or_default();
    format_user(&user, ctx.format)
}
