//! Application shell state: projects, tasks, the current selection and the
//! sessions started during this run.
//!
//! The workspace is UI-agnostic. The dashboard and the CLI commands both
//! drive it, and the timer only ever sees [`Workspace::current_task`].

use chrono::Utc;
use tracing::{debug, info};

use crate::api::{
    NewProject, NewTask, Priority, Project, Task, WorkSession, INBOX_PROJECT_ID,
};
use crate::core::WorkspaceApi;
use crate::error::BlitzError;

/// Selected project and task, held by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub project_id: Option<String>,
    pub task_id: Option<String>,
}

/// One entry of the session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub session: WorkSession,
    pub task_title: Option<String>,
}

#[derive(Debug, Default)]
pub struct Workspace {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    selection: Selection,
    history: Vec<SessionRecord>,
}

impl Workspace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch projects, then tasks.
    ///
    /// Selections that no longer resolve are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails. Nothing is replaced then.
    pub async fn load(&mut self, api: &dyn WorkspaceApi) -> Result<(), BlitzError> {
        let projects = api.list_projects().await?;
        let tasks = api.list_tasks().await?;
        debug!(projects = projects.len(), tasks = tasks.len(), "workspace loaded");

        self.projects = projects;
        self.tasks = tasks;

        if let Some(id) = &self.selection.project_id {
            if !self.projects.iter().any(|p| &p.id == id) {
                self.selection.project_id = None;
            }
        }
        if let Some(id) = self.selection.task_id.clone() {
            if !self.visible_tasks().iter().any(|t| t.id == id) {
                self.selection.task_id = None;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn history(&self) -> &[SessionRecord] {
        &self.history
    }

    /// Tasks of the selected project, or every task when none is selected.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        match &self.selection.project_id {
            Some(id) => self.tasks.iter().filter(|t| t.in_project(id)).collect(),
            None => self.tasks.iter().collect(),
        }
    }

    #[must_use]
    pub fn current_project(&self) -> Option<&Project> {
        let id = self.selection.project_id.as_deref()?;
        self.projects.iter().find(|p| p.id == id)
    }

    /// The task the timer focuses on.
    #[must_use]
    pub fn current_task(&self) -> Option<&Task> {
        let id = self.selection.task_id.as_deref()?;
        self.tasks.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Select a project, or clear the filter with `None`.
    ///
    /// A selected task outside the new project is deselected.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown project.
    pub fn select_project(&mut self, project_id: Option<&str>) -> Result<(), BlitzError> {
        if let Some(id) = project_id {
            if !self.projects.iter().any(|p| p.id == id) {
                return Err(BlitzError::NotFound(format!("Project '{id}'")));
            }
        }
        self.selection.project_id = project_id.map(str::to_string);

        let outside = match (project_id, self.current_task()) {
            (Some(project), Some(task)) => !task.in_project(project),
            _ => false,
        };
        if outside {
            self.selection.task_id = None;
        }
        Ok(())
    }

    /// Select one of the visible tasks.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the task is unknown or filtered out.
    pub fn select_task(&mut self, task_id: &str) -> Result<(), BlitzError> {
        if !self.visible_tasks().iter().any(|t| t.id == task_id) {
            return Err(BlitzError::NotFound(format!("Task '{task_id}'")));
        }
        self.selection.task_id = Some(task_id.to_string());
        Ok(())
    }

    pub fn clear_task(&mut self) {
        self.selection.task_id = None;
    }

    /// Create a project and append it to the list.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank name, or the API error.
    pub async fn add_project(
        &mut self,
        api: &dyn WorkspaceApi,
        name: &str,
    ) -> Result<Project, BlitzError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BlitzError::Validation("project name is empty".to_string()));
        }

        let project = api
            .create_project(&NewProject {
                name: name.to_string(),
            })
            .await?;
        info!(project_id = %project.id, "project created");
        self.projects.push(project.clone());
        Ok(project)
    }

    /// Create a task in the selected project, or in the inbox.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank title, or the API error.
    pub async fn add_task(
        &mut self,
        api: &dyn WorkspaceApi,
        title: &str,
        priority: Priority,
    ) -> Result<Task, BlitzError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BlitzError::Validation("task title is empty".to_string()));
        }

        let project_id = self
            .selection
            .project_id
            .clone()
            .unwrap_or_else(|| INBOX_PROJECT_ID.to_string());

        let task = api
            .create_task(&NewTask {
                title: title.to_string(),
                project_id,
                priority,
            })
            .await?;
        info!(task_id = %task.id, "task created");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Record a session the timer just opened.
    pub fn on_session_started(&mut self, session: WorkSession) {
        let task_title = session
            .task_id
            .as_deref()
            .and_then(|id| self.task(id))
            .map(|t| t.title.clone());
        self.history.push(SessionRecord {
            session,
            task_title,
        });
    }

    /// Mark a session closed. Returns whether it was in the history.
    pub fn on_session_stopped(&mut self, session_id: &str) -> bool {
        match self
            .history
            .iter_mut()
            .find(|r| r.session.id == session_id)
        {
            Some(record) => {
                if record.session.stopped_at.is_none() {
                    record.session.stopped_at = Some(Utc::now());
                }
                true
            }
            None => false,
        }
    }
}
