use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Project id used for tasks created without a selected project.
pub const INBOX_PROJECT_ID: &str = "inbox";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl Task {
    /// Whether the task belongs to the given project.
    #[must_use]
    pub fn in_project(&self, project_id: &str) -> bool {
        self.project_id.as_deref() == Some(project_id)
    }
}

/// Timer mode, shared by the local timer and the remote session record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Fixed-duration countdown.
    #[default]
    Pomodoro,
    /// Open-ended count-up.
    Stopwatch,
}

impl SessionMode {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Pomodoro => "Pomodoro",
            Self::Stopwatch => "Stopwatch",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pomodoro => Self::Stopwatch,
            Self::Stopwatch => Self::Pomodoro,
        }
    }
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A server-tracked record of one continuous timer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    pub id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub mode: SessionMode,
    #[serde(default, alias = "start_time")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "stop_time")]
    pub stopped_at: Option<DateTime<Utc>>,
}

impl WorkSession {
    /// A session is open until it has a stop time.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.stopped_at.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProject {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub project_id: String,
    pub priority: Priority,
}

/// Body of `POST /sessions/start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartSession {
    pub task_id: Option<String>,
    pub mode: SessionMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_defaults() {
        let task: Task = serde_json::from_str(r#"{"id":"t1","title":"Write report"}"#).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.description.is_none());
        assert!(task.project_id.is_none());
    }

    #[test]
    fn test_task_in_project() {
        let task: Task = serde_json::from_str(
            r#"{"id":"t1","title":"x","priority":"high","project_id":"p1"}"#,
        )
        .unwrap();
        assert_eq!(task.priority, Priority::High);
        assert!(task.in_project("p1"));
        assert!(!task.in_project("p2"));
    }

    #[test]
    fn test_work_session_minimal_response() {
        let session: WorkSession = serde_json::from_str(r#"{"id":"s1"}"#).unwrap();
        assert_eq!(session.id, "s1");
        assert_eq!(session.mode, SessionMode::Pomodoro);
        assert!(session.is_open());
    }

    #[test]
    fn test_work_session_closed() {
        let session: WorkSession = serde_json::from_str(
            r#"{"id":"s1","mode":"stopwatch","start_time":"2024-05-01T10:00:00Z","stop_time":"2024-05-01T10:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(session.mode, SessionMode::Stopwatch);
        assert!(!session.is_open());
    }

    #[test]
    fn test_start_session_body() {
        let body = StartSession {
            task_id: None,
            mode: SessionMode::Stopwatch,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"task_id":null,"mode":"stopwatch"}"#
        );
    }

    #[test]
    fn test_mode_toggled() {
        assert_eq!(SessionMode::Pomodoro.toggled(), SessionMode::Stopwatch);
        assert_eq!(SessionMode::Stopwatch.toggled(), SessionMode::Pomodoro);
    }
}
