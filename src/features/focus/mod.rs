//! Focus timer.
//!
//! [`SessionTimer`] is the pure state machine, [`Ticker`] the one-second
//! clock and [`SessionController`] glues both to the session API.

mod controller;
mod ticker;
pub mod timer;

pub use controller::{SessionController, TimerEvent, TimerNotice};
pub use ticker::Ticker;
pub use timer::{
    format_duration, format_duration_mmss, parse_duration, render_progress_bar, Effect,
    SessionLink, SessionTimer, TimerState, DEFAULT_POMODORO_SECONDS,
};
