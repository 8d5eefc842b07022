//! Foreground focus timer.
//!
//! Runs one timer in the terminal until the pomodoro completes or the user
//! presses Ctrl+C, then closes the work session before returning.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{RetryPolicy, SessionMode, Task, WorkSession};
use crate::cli::args::{FocusArgs, OutputFormat};
use crate::cli::commands::Context;
use crate::error::BlitzError;
use crate::features::focus::{
    format_duration, parse_duration, render_progress_bar, SessionController, SessionTimer,
    TimerNotice,
};
use crate::output::to_json;
use crate::shell::Workspace;

/// Result of a foreground run.
#[derive(Debug, Clone, Serialize)]
pub struct FocusSummary {
    pub mode: SessionMode,
    pub task: Option<String>,
    pub elapsed_seconds: u64,
    pub completed: bool,
    pub sessions: Vec<WorkSession>,
    pub sync_errors: Vec<String>,
}

impl FocusSummary {
    fn render_pretty(&self) -> String {
        let mut output = Vec::new();

        #[allow(clippy::cast_possible_wrap)]
        let elapsed = format_duration(chrono::Duration::seconds(self.elapsed_seconds as i64));
        let headline = if self.completed {
            format!("✅ {} complete!", self.mode.display_name()).green().to_string()
        } else {
            format!("⏹️  {} stopped", self.mode.display_name())
        };
        output.push(headline);
        output.push(format!("   Duration: {elapsed}"));

        if let Some(task) = &self.task {
            output.push(format!("   Task: {task}"));
        }

        match self.sessions.as_slice() {
            [] => output.push("   Session: not recorded".dimmed().to_string()),
            sessions => {
                for session in sessions {
                    let state = if session.is_open() { "left open" } else { "closed" };
                    output.push(format!("   Session: {} ({state})", session.id));
                }
            }
        }

        for error in &self.sync_errors {
            output.push(format!("{} {error}", "warning:".yellow().bold()));
        }

        output.join("\n")
    }
}

/// Parse `--duration`, falling back to the configured pomodoro length.
fn pomodoro_seconds(duration: Option<&str>, default: u64) -> Result<u64, BlitzError> {
    let Some(raw) = duration else {
        return Ok(default);
    };
    let parsed = parse_duration(raw)
        .ok_or_else(|| BlitzError::Validation(format!("invalid duration '{raw}'")))?;
    u64::try_from(parsed.num_seconds())
        .map_err(|_| BlitzError::Validation(format!("invalid duration '{raw}'")))
}

/// Seconds actually spent in the current run.
const fn elapsed_seconds(timer: &SessionTimer) -> u64 {
    match timer.mode() {
        SessionMode::Pomodoro => timer.pomodoro_seconds().saturating_sub(timer.seconds()),
        SessionMode::Stopwatch => timer.seconds(),
    }
}

fn draw(timer: &SessionTimer, task: Option<&Task>) {
    let label = task.map_or("No task", |t| t.title.as_str());
    let line = match timer.mode() {
        SessionMode::Pomodoro => format!(
            "\r⏱  {} {} {}  {}   ",
            timer.format().bold(),
            render_progress_bar(timer.progress(), 30),
            timer.state(),
            label.dimmed()
        ),
        SessionMode::Stopwatch => format!(
            "\r⏱  {} {}  {}   ",
            timer.format().bold(),
            timer.state(),
            label.dimmed()
        ),
    };

    let mut stderr = std::io::stderr();
    // Drawing is best effort; a closed stderr must not abort the session.
    write!(stderr, "{line}").ok();
    stderr.flush().ok();
}

/// Execute focus command
///
/// # Errors
///
/// Returns an error if not logged in, the task is unknown or the duration
/// is invalid. Session sync failures are reported in the output instead.
pub async fn focus(ctx: &Context, args: FocusArgs) -> Result<String, BlitzError> {
    ctx.require_auth()?;

    let mode = args.mode.unwrap_or(ctx.config.focus.default_mode);
    let seconds = pomodoro_seconds(args.duration.as_deref(), ctx.config.focus.pomodoro_seconds())?;

    let mut workspace = Workspace::new();
    if let Some(task_id) = &args.task {
        workspace.load(ctx.client.as_ref()).await?;
        workspace.select_task(task_id)?;
    }
    let task = workspace.current_task().cloned();

    let (events_tx, mut events) = mpsc::unbounded_channel();
    let mut controller = SessionController::new(
        SessionTimer::new(mode, seconds),
        ctx.client.clone(),
        RetryPolicy::from(&ctx.config.sync),
        events_tx,
    );

    let mut sync_errors = Vec::new();
    let mut completed = false;
    let mut record = |workspace: &mut Workspace, notices: Vec<TimerNotice>| {
        for notice in notices {
            match notice {
                TimerNotice::SessionStarted(session) => workspace.on_session_started(session),
                TimerNotice::SessionStopped { session_id } => {
                    workspace.on_session_stopped(&session_id);
                }
                TimerNotice::Completed => completed = true,
                TimerNotice::SyncFailed(message) => sync_errors.push(message),
            }
        }
    };

    record(&mut workspace, controller.start(task.as_ref()));
    draw(controller.timer(), task.as_ref());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                debug!("interrupted");
                break;
            }
            event = events.recv() => {
                let Some(event) = event else { break };
                let notices = controller.handle(event);
                let done = notices.contains(&TimerNotice::Completed);
                record(&mut workspace, notices);
                draw(controller.timer(), task.as_ref());
                if done {
                    break;
                }
            }
        }
    }
    eprintln!();

    let elapsed = elapsed_seconds(controller.timer());
    let deadline = Duration::from_secs(ctx.config.api.timeout_secs.saturating_mul(2));
    let notices = controller.finish(&mut events, deadline).await;
    record(&mut workspace, notices);
    drop(record);

    let summary = FocusSummary {
        mode,
        task: task.map(|t| t.title),
        elapsed_seconds: elapsed,
        completed,
        sessions: workspace.history().iter().map(|r| r.session.clone()).collect(),
        sync_errors,
    };

    match ctx.format {
        OutputFormat::Json => to_json(&summary),
        OutputFormat::Pretty => Ok(summary.render_pretty()),
    }
}
