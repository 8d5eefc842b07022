//! Event handling for the TUI.
//!
//! Keys are mapped to [`Action`]s depending on what holds focus. While a
//! prompt is open every printable key, space included, is text for it.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::tui::app::{App, PromptKind, Screen};

/// Action to take after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    DemoLogin,
    Refresh,
    NextPane,
    Up,
    Down,
    Select,
    /// Start or pause the timer.
    Toggle,
    Stop,
    Reset,
    SwitchMode,
    OpenPrompt(PromptKind),
    PromptInput(char),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
}

/// Map a key press to an action.
#[must_use]
pub fn map_key(app: &App, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if app.prompt.is_some() {
        return match key.code {
            KeyCode::Enter => Some(Action::PromptSubmit),
            KeyCode::Esc => Some(Action::PromptCancel),
            KeyCode::Backspace => Some(Action::PromptBackspace),
            KeyCode::Char(c) => Some(Action::PromptInput(c)),
            _ => None,
        };
    }

    if app.screen == Screen::Hero {
        return match key.code {
            KeyCode::Char('d') | KeyCode::Enter => Some(Action::DemoLogin),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::Help),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Char('s') => Some(Action::Stop),
        KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Char('m') => Some(Action::SwitchMode),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('p') => Some(Action::OpenPrompt(PromptKind::NewProject)),
        KeyCode::Char('a') => Some(Action::OpenPrompt(PromptKind::NewTask)),
        KeyCode::Tab => Some(Action::NextPane),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Enter => Some(Action::Select),
        _ => None,
    }
}

/// Forward terminal events from a blocking reader thread.
///
/// The thread exits once the receiving side is dropped.
pub fn spawn_input_reader(events: UnboundedSender<Event>) {
    std::thread::spawn(move || {
        while !events.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(false) => {}
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if events.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "event read failed");
                        break;
                    }
                },
                Err(e) => {
                    warn!(error = %e, "event poll failed");
                    break;
                }
            }
        }
    });
}
