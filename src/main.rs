use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use blitznow::cli::args::{Cli, Commands, ProjectArgs, TaskArgs};
use blitznow::cli::commands::{self, Context};
use blitznow::config::Paths;
use blitznow::tui;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let dashboard = matches!(cli.command, None | Some(Commands::Tui));
    init_tracing(cli.quiet, cli.verbose, dashboard)?;

    if let Some(Commands::Completions { shell }) = &cli.command {
        print!("{}", commands::completions(*shell)?);
        return Ok(());
    }

    let ctx = Context::new(&cli)?;

    let output = match cli.command {
        None | Some(Commands::Tui) => {
            tui::run(&ctx).await?;
            String::new()
        }
        Some(Commands::Login(args)) => commands::login(&ctx, &args).await?,
        Some(Commands::Logout) => commands::logout(&ctx)?,
        Some(Commands::Whoami) => commands::whoami(&ctx).await?,
        Some(Commands::Project(ProjectArgs { command })) => commands::project(&ctx, command).await?,
        Some(Commands::Task(TaskArgs { command })) => commands::task(&ctx, command).await?,
        Some(Commands::Focus(args)) => commands::focus(&ctx, args).await?,
        Some(Commands::Completions { .. }) => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}

/// Log to stderr, or to `~/.blitz/blitz.log` while the dashboard owns the screen.
fn init_tracing(quiet: bool, verbose: bool, to_file: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env("BLITZ_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    let result = if to_file {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&paths.log_file)
            .with_context(|| format!("failed to open {}", paths.log_file.display()))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    };

    result.map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}
