//! blitznow - BlitzNow focus timer for the terminal
//!
//! This crate provides a command-line client and a ratatui dashboard for the
//! BlitzNow task service: projects, tasks and pomodoro/stopwatch work
//! sessions recorded on the server.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod shell;
pub mod tui;

pub use api::ApiClient;
pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::BlitzError;
