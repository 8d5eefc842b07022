//! Application state for the TUI.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::warn;

use crate::api::{self, ApiClient, Credentials, Priority, RetryPolicy, Task, User};
use crate::cli::commands::Context;
use crate::config::{DemoConfig, TokenStore};
use crate::core::WorkspaceApi;
use crate::error::BlitzError;
use crate::features::focus::{SessionController, SessionTimer, TimerEvent, TimerNotice};
use crate::shell::Workspace;

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Landing screen shown while signed out.
    Hero,
    /// Projects, tasks and the timer.
    Dashboard,
}

/// Dashboard list with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Projects,
    Tasks,
}

/// What a text prompt creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    NewProject,
    NewTask,
}

impl PromptKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewProject => "New project",
            Self::NewTask => "New task",
        }
    }
}

/// Text prompt holding keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// Status bar message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Everything needed to sign in from the hero screen.
struct Auth {
    client: Arc<ApiClient>,
    tokens: TokenStore,
    demo: DemoConfig,
}

/// Application state.
pub struct App {
    workspace_api: Arc<dyn WorkspaceApi>,
    auth: Option<Auth>,
    controller: SessionController,
    /// Projects, tasks and session history.
    pub workspace: Workspace,
    pub screen: Screen,
    pub pane: Pane,
    /// Cursor in the project list; 0 is "All tasks".
    pub project_cursor: usize,
    pub task_cursor: usize,
    pub prompt: Option<Prompt>,
    pub status: Option<Status>,
    pub user: Option<User>,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    /// Create the app for the configured server.
    #[must_use]
    pub fn new(ctx: &Context, events: UnboundedSender<TimerEvent>) -> Self {
        let focus = &ctx.config.focus;
        let controller = SessionController::new(
            SessionTimer::new(focus.default_mode, focus.pomodoro_seconds()),
            ctx.client.clone(),
            RetryPolicy::from(&ctx.config.sync),
            events,
        )
        .with_auto_stop(focus.auto_stop);

        let mut app = Self::with_parts(ctx.client.clone(), controller, ctx.client.is_authenticated());
        app.user = ctx.tokens.load_user();
        app.auth = Some(Auth {
            client: ctx.client.clone(),
            tokens: ctx.tokens.clone(),
            demo: ctx.config.demo.clone(),
        });
        app
    }

    /// Create the app from its collaborators. Sign-in is unavailable.
    #[must_use]
    pub fn with_parts(
        workspace_api: Arc<dyn WorkspaceApi>,
        controller: SessionController,
        authenticated: bool,
    ) -> Self {
        Self {
            workspace_api,
            auth: None,
            controller,
            workspace: Workspace::new(),
            screen: if authenticated {
                Screen::Dashboard
            } else {
                Screen::Hero
            },
            pane: Pane::Tasks,
            project_cursor: 0,
            task_cursor: 0,
            prompt: None,
            status: Some(Status::Info("Press ? for help".to_string())),
            user: None,
            show_help: false,
            should_quit: false,
        }
    }

    #[must_use]
    pub const fn timer(&self) -> &SessionTimer {
        self.controller.timer()
    }

    /// Task under the cursor in the task list.
    #[must_use]
    pub fn highlighted_task(&self) -> Option<&Task> {
        self.workspace.visible_tasks().get(self.task_cursor).copied()
    }

    fn info(&mut self, message: impl Into<String>) {
        self.status = Some(Status::Info(message.into()));
    }

    fn error(&mut self, message: impl Into<String>) {
        self.status = Some(Status::Error(message.into()));
    }

    /// Reload projects and tasks.
    pub async fn refresh(&mut self) {
        match self.workspace.load(self.workspace_api.as_ref()).await {
            Ok(()) => {
                self.clamp_cursors();
                let count = self.workspace.tasks().len();
                self.info(format!("Loaded {count} tasks"));
            }
            Err(BlitzError::Unauthorized(_) | BlitzError::NotAuthenticated) => {
                self.screen = Screen::Hero;
                self.error("Your session expired. Press d to sign in again");
            }
            Err(e) => self.error(format!("Refresh failed: {e}")),
        }
    }

    /// Sign in with the demo identity, registering it if needed.
    pub async fn demo_login(&mut self) {
        let Some(auth) = &self.auth else {
            self.error("Sign-in is not available");
            return;
        };

        let credentials = Credentials::demo(&auth.demo);
        let result = api::login(auth.client.as_ref(), &credentials).await;
        match result {
            Ok(response) => {
                if let Err(e) = auth.tokens.store(&response.token) {
                    warn!(error = %e, "could not persist token");
                }
                if let Some(user) = &response.user {
                    if let Err(e) = auth.tokens.store_user(user) {
                        warn!(error = %e, "could not persist profile");
                    }
                }
                self.user = response.user;
                self.screen = Screen::Dashboard;
                self.refresh().await;
            }
            Err(e) => self.error(format!("Sign-in failed: {e}")),
        }
    }

    /// Switch keyboard focus between the lists.
    pub fn next_pane(&mut self) {
        self.pane = match self.pane {
            Pane::Projects => Pane::Tasks,
            Pane::Tasks => Pane::Projects,
        };
    }

    pub fn move_up(&mut self) {
        let cursor = match self.pane {
            Pane::Projects => &mut self.project_cursor,
            Pane::Tasks => &mut self.task_cursor,
        };
        *cursor = cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = match self.pane {
            Pane::Projects => self.workspace.projects().len() + 1,
            Pane::Tasks => self.workspace.visible_tasks().len(),
        };
        let cursor = match self.pane {
            Pane::Projects => &mut self.project_cursor,
            Pane::Tasks => &mut self.task_cursor,
        };
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    fn clamp_cursors(&mut self) {
        self.project_cursor = self.project_cursor.min(self.workspace.projects().len());
        let tasks = self.workspace.visible_tasks().len();
        self.task_cursor = self.task_cursor.min(tasks.saturating_sub(1));
    }

    /// Enter: filter by the project, or focus the task and start the timer.
    pub fn select(&mut self) {
        match self.pane {
            Pane::Projects => {
                let id = self
                    .project_cursor
                    .checked_sub(1)
                    .and_then(|i| self.workspace.projects().get(i))
                    .map(|p| p.id.clone());
                match self.workspace.select_project(id.as_deref()) {
                    Ok(()) => {
                        self.task_cursor = 0;
                        self.pane = Pane::Tasks;
                    }
                    Err(e) => self.error(e.to_string()),
                }
            }
            Pane::Tasks => {
                let Some(id) = self.highlighted_task().map(|t| t.id.clone()) else {
                    return;
                };
                if !self.timer().is_idle() {
                    self.info("Stop the timer before switching tasks");
                    return;
                }
                match self.workspace.select_task(&id) {
                    Ok(()) => {
                        let notices = self.controller.start(self.workspace.current_task());
                        self.apply_notices(notices);
                    }
                    Err(e) => self.error(e.to_string()),
                }
            }
        }
    }

    /// Space: start or pause.
    pub fn toggle_timer(&mut self) {
        let notices = self.controller.toggle(self.workspace.current_task());
        self.apply_notices(notices);
    }

    pub fn stop_timer(&mut self) {
        let notices = self.controller.stop();
        self.apply_notices(notices);
    }

    pub fn reset_timer(&mut self) {
        let notices = self.controller.reset();
        self.apply_notices(notices);
    }

    pub fn switch_mode(&mut self) {
        let mode = self.timer().mode().toggled();
        if self.controller.set_mode(mode) {
            self.info(format!("{} mode", mode.display_name()));
        } else {
            self.info("Stop the timer before switching mode");
        }
    }

    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(Prompt {
            kind,
            input: String::new(),
        });
    }

    pub fn prompt_input(&mut self, c: char) {
        if let Some(prompt) = &mut self.prompt {
            prompt.input.push(c);
        }
    }

    pub fn prompt_backspace(&mut self) {
        if let Some(prompt) = &mut self.prompt {
            prompt.input.pop();
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    /// Create the project or task typed into the prompt.
    ///
    /// A rejected entry keeps the prompt open so it can be corrected.
    pub async fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.clone() else {
            return;
        };

        let api = self.workspace_api.as_ref();
        let result = match prompt.kind {
            PromptKind::NewProject => self
                .workspace
                .add_project(api, &prompt.input)
                .await
                .map(|p| format!("Created project {}", p.name)),
            PromptKind::NewTask => self
                .workspace
                .add_task(api, &prompt.input, Priority::default())
                .await
                .map(|t| format!("Created task {}", t.title)),
        };

        match result {
            Ok(message) => {
                self.prompt = None;
                self.info(message);
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    /// Feed a timer event from the channel.
    pub fn on_timer_event(&mut self, event: TimerEvent) {
        let notices = self.controller.handle(event);
        self.apply_notices(notices);
    }

    fn apply_notices(&mut self, notices: Vec<TimerNotice>) {
        for notice in notices {
            match notice {
                TimerNotice::SessionStarted(session) => {
                    self.workspace.on_session_started(session);
                    self.info("Session started");
                }
                TimerNotice::SessionStopped { session_id } => {
                    self.workspace.on_session_stopped(&session_id);
                    self.info("Session saved");
                }
                TimerNotice::Completed => {
                    self.info("Pomodoro complete! Press s to log it");
                }
                TimerNotice::SyncFailed(message) => self.error(message),
            }
        }
    }

    /// Stop the timer and wait for outstanding session calls.
    pub async fn finish(&mut self, events: &mut UnboundedReceiver<TimerEvent>) {
        let notices = self.controller.finish(events, Duration::from_secs(10)).await;
        self.apply_notices(notices);
    }

    /// Session calls still in flight.
    #[must_use]
    pub const fn pending_requests(&self) -> usize {
        self.controller.in_flight()
    }
}
