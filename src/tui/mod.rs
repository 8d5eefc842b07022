//! Terminal User Interface (TUI) for blitz.
//!
//! The dashboard runs one event loop: key presses from a reader thread and
//! timer events from the session controller are multiplexed with
//! `tokio::select!`, and the screen is redrawn after each one.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Pane, Prompt, PromptKind, Screen, Status};
pub use event::{map_key, Action};

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

use crate::cli::commands::Context;
use crate::error::BlitzError;
use crate::features::focus::TimerEvent;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub async fn run(ctx: &Context) -> Result<(), BlitzError> {
    // Setup terminal
    enable_raw_mode().map_err(|e| BlitzError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| BlitzError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| BlitzError::Terminal(format!("Failed to create terminal: {e}")))?;

    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    event::spawn_input_reader(input_tx);

    // Create app state and run main loop
    let mut app = App::new(ctx, timer_tx);
    if app.screen == Screen::Dashboard {
        app.refresh().await;
    }
    let result = run_app(&mut terminal, &mut app, &mut timer_rx, &mut input_rx).await;

    // Close the open session before the terminal goes away
    app.finish(&mut timer_rx).await;
    input_rx.close();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    info!("dashboard closed");
    result
}

/// Run the main application loop.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    timer_rx: &mut UnboundedReceiver<TimerEvent>,
    input_rx: &mut UnboundedReceiver<Event>,
) -> Result<(), BlitzError> {
    loop {
        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| BlitzError::Terminal(format!("Failed to draw: {e}")))?;

        tokio::select! {
            Some(event) = timer_rx.recv() => app.on_timer_event(event),
            input = input_rx.recv() => match input {
                Some(Event::Key(key)) => {
                    if let Some(action) = map_key(app, key) {
                        dispatch(app, action).await;
                    }
                }
                Some(_) => {}
                None => {
                    return Err(BlitzError::Terminal("Terminal input closed".to_string()));
                }
            },
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Apply an action to the app.
pub async fn dispatch(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::Help => app.show_help = !app.show_help,
        Action::DemoLogin => app.demo_login().await,
        Action::Refresh => app.refresh().await,
        Action::NextPane => app.next_pane(),
        Action::Up => app.move_up(),
        Action::Down => app.move_down(),
        Action::Select => app.select(),
        Action::Toggle => app.toggle_timer(),
        Action::Stop => app.stop_timer(),
        Action::Reset => app.reset_timer(),
        Action::SwitchMode => app.switch_mode(),
        Action::OpenPrompt(kind) => app.open_prompt(kind),
        Action::PromptInput(c) => app.prompt_input(c),
        Action::PromptBackspace => app.prompt_backspace(),
        Action::PromptSubmit => app.submit_prompt().await,
        Action::PromptCancel => app.cancel_prompt(),
    }
}
