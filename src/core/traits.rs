//! Seams between the client core and the remote service.
//!
//! The session timer and the workspace only see these traits, so tests can
//! replace the HTTP client with mocks.

use async_trait::async_trait;

use crate::api::types::{
    AuthResponse, LoginRequest, NewProject, NewTask, Project, RegisterRequest, StartSession, Task,
    WorkSession,
};
use crate::error::BlitzError;

/// Remote work-session record keeping.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Open a work session.
    async fn start_session(&self, request: &StartSession) -> Result<WorkSession, BlitzError>;

    /// Close a work session.
    async fn stop_session(&self, session_id: &str) -> Result<(), BlitzError>;
}

/// Remote project and task collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, BlitzError>;

    async fn create_project(&self, project: &NewProject) -> Result<Project, BlitzError>;

    async fn list_tasks(&self) -> Result<Vec<Task>, BlitzError>;

    async fn create_task(&self, task: &NewTask) -> Result<Task, BlitzError>;
}

/// Account login and registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`. A refused login is `Unauthorized` or `NotFound`.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, BlitzError>;

    /// `POST /auth/register`.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, BlitzError>;

    /// Use `token` for every later authenticated request.
    fn attach_token(&self, token: Option<String>);
}
