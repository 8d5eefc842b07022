//! HTTP implementation of the service traits.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::types::{
    AuthResponse, LoginRequest, NewProject, NewTask, Project, RegisterRequest, StartSession, Task,
    WorkSession,
};
use crate::core::{AuthApi, SessionApi, WorkspaceApi};
use crate::error::BlitzError;

/// HTTP client for the BlitzNow API.
///
/// The bearer token sits behind a lock so a login performed from the
/// dashboard is visible to every component sharing the client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BlitzError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("blitz/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Attach a token at construction time.
    #[must_use]
    pub fn with_token(self, token: Option<String>) -> Self {
        self.set_token(token);
        self
    }

    /// Replace the bearer token.
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    /// Current bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn bearer(&self) -> Result<String, BlitzError> {
        self.token()
            .map(|token| format!("Bearer {token}"))
            .ok_or(BlitzError::NotAuthenticated)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BlitzError> {
        debug!(path, "GET");
        let resp = self
            .http
            .get(self.url(path))
            .header(reqwest::header::AUTHORIZATION, self.bearer()?)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, authenticated: bool) -> Result<T, BlitzError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.post(path, body, authenticated).await?;
        Ok(resp.json().await?)
    }

    async fn post<B>(&self, path: &str, body: &B, authenticated: bool) -> Result<reqwest::Response, BlitzError>
    where
        B: Serialize + Sync + ?Sized,
    {
        debug!(path, authenticated, "POST");
        let mut request = self.http.post(self.url(path)).json(body);
        if authenticated {
            request = request.header(reqwest::header::AUTHORIZATION, self.bearer()?);
        }
        check_response(request.send().await?).await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, BlitzError> {
        self.post_json("auth/login", request, false).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, BlitzError> {
        self.post_json("auth/register", request, false).await
    }

    fn attach_token(&self, token: Option<String>) {
        self.set_token(token);
    }
}

#[async_trait]
impl WorkspaceApi for ApiClient {
    async fn list_projects(&self) -> Result<Vec<Project>, BlitzError> {
        self.get_json("projects").await
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, BlitzError> {
        self.post_json("projects", project, true).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, BlitzError> {
        self.get_json("tasks").await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, BlitzError> {
        self.post_json("tasks", task, true).await
    }
}

#[async_trait]
impl SessionApi for ApiClient {
    async fn start_session(&self, request: &StartSession) -> Result<WorkSession, BlitzError> {
        self.post_json("sessions/start", request, true).await
    }

    async fn stop_session(&self, session_id: &str) -> Result<(), BlitzError> {
        let path = format!("sessions/{session_id}/stop");
        self.post(&path, &serde_json::json!({}), true).await?;
        Ok(())
    }
}

/// Map a non-success response onto the error taxonomy.
///
/// # Errors
///
/// - 401/403 → [`BlitzError::Unauthorized`]
/// - 404 → [`BlitzError::NotFound`]
/// - any other non-2xx → [`BlitzError::Api`]
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, BlitzError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        body
    };

    match status.as_u16() {
        401 | 403 => Err(BlitzError::Unauthorized(message)),
        404 => Err(BlitzError::NotFound(message)),
        code => Err(BlitzError::Api {
            status: code,
            message,
        }),
    }
}
