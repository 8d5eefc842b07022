use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::api::{Priority, SessionMode};

#[derive(Parser)]
#[command(name = "blitz")]
#[command(about = "Focus timer and task list for the BlitzNow service")]
#[command(long_about = "blitz - BlitzNow in your terminal

Track focused work against your BlitzNow projects and tasks. Every timer
run is recorded as a work session on the server.

QUICK START:
  blitz login --demo          Sign in with the demo account
  blitz task add \"Outline\"    Add a task to the inbox
  blitz focus --task <ID>     Run a pomodoro on a task
  blitz                       Open the dashboard

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  blitz <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Base URL of the BlitzNow API
    #[arg(long, env = "BLITZ_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the token
    ///
    /// Without --email/--password the demo identity from the config file is
    /// used. With --demo a missing account is registered on the fly.
    ///
    /// Examples:
    ///   blitz login --email me@example.com --password hunter22
    ///   blitz login --demo
    Login(LoginArgs),

    /// Forget the stored token
    Logout,

    /// Show who the stored token belongs to
    Whoami,

    /// Manage projects
    #[command(alias = "p")]
    Project(ProjectArgs),

    /// Manage tasks
    #[command(alias = "t")]
    Task(TaskArgs),

    /// Run a focus timer in the foreground
    ///
    /// Opens a work session on the server and counts down (pomodoro) or up
    /// (stopwatch). Ctrl+C stops the timer and closes the session.
    ///
    /// Examples:
    ///   blitz focus
    ///   blitz focus --task 42 --duration 50m
    ///   blitz focus --mode stopwatch
    #[command(alias = "f")]
    Focus(FocusArgs),

    /// Open the interactive dashboard (default)
    Tui,

    /// Generate shell completions
    ///
    /// Example: blitz completions zsh > ~/.zsh/completions/_blitz
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long, requires = "password")]
    pub email: Option<String>,

    /// Account password
    #[arg(long, requires = "email")]
    pub password: Option<String>,

    /// Register the account if it does not exist yet
    #[arg(long)]
    pub demo: bool,
}

#[derive(Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommands,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects
    #[command(alias = "ls")]
    List,

    /// Create a project
    Add {
        /// Project name
        name: String,
    },
}

#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks
    #[command(alias = "ls")]
    List {
        /// Only tasks of this project
        #[arg(long, short = 'p')]
        project: Option<String>,
    },

    /// Create a task
    ///
    /// Tasks without --project land in the inbox.
    Add {
        /// Task title
        title: String,

        /// Project ID
        #[arg(long, short = 'p')]
        project: Option<String>,

        /// Priority
        #[arg(long, value_enum, default_value = "medium")]
        priority: Priority,
    },
}

#[derive(Args)]
pub struct FocusArgs {
    /// Task ID to focus on
    #[arg(long, short = 't')]
    pub task: Option<String>,

    /// Timer mode (defaults to focus.default_mode)
    #[arg(long, short = 'm', value_enum)]
    pub mode: Option<SessionMode>,

    /// Pomodoro length (e.g. 25m, 1h, 90s)
    #[arg(long, short = 'd')]
    pub duration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["blitz"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_task_add_arguments() {
        let cli =
            Cli::try_parse_from(["blitz", "-o", "json", "task", "add", "Outline", "--priority", "high"])
                .unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Some(Commands::Task(TaskArgs {
                command:
                    TaskCommands::Add {
                        title,
                        project,
                        priority,
                    },
            })) => {
                assert_eq!(title, "Outline");
                assert!(project.is_none());
                assert_eq!(priority, Priority::High);
            }
            _ => panic!("expected task add"),
        }
    }

    #[test]
    fn test_focus_mode_parses() {
        let cli = Cli::try_parse_from(["blitz", "focus", "--mode", "stopwatch"]).unwrap();
        match cli.command {
            Some(Commands::Focus(args)) => assert_eq!(args.mode, Some(SessionMode::Stopwatch)),
            _ => panic!("expected focus"),
        }
    }

    #[test]
    fn test_login_email_requires_password() {
        assert!(Cli::try_parse_from(["blitz", "login", "--email", "a@b.c"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["blitz", "-v", "-q", "whoami"]).is_err());
    }
}
