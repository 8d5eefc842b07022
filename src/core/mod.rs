//! Core abstractions for blitz.
//!
//! This module provides the traits the timer, workspace and login flow are
//! written against.

mod traits;

pub use traits::{AuthApi, SessionApi, WorkspaceApi};

#[cfg(test)]
pub use traits::{MockAuthApi, MockSessionApi, MockWorkspaceApi};
