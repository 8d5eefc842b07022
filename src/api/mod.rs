//! Client for the BlitzNow HTTP API.
//!
//! JSON over HTTP(S), bearer-token authenticated. Project and task CRUD,
//! login/registration and work-session boundaries.

pub mod auth;
mod client;
mod retry;
pub mod types;

pub use auth::{login, Credentials};
pub use client::{check_response, ApiClient};
pub use retry::RetryPolicy;
pub use types::{
    AuthResponse, NewProject, NewTask, Priority, Project, SessionMode, StartSession, Task, User,
    WorkSession, INBOX_PROJECT_ID,
};
