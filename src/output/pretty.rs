use colored::Colorize;

use crate::api::{Priority, Project, Task, User};

fn priority_badge(priority: Priority) -> colored::ColoredString {
    match priority {
        Priority::High => "!!!".red(),
        Priority::Medium => "!! ".yellow(),
        Priority::Low => "!  ".dimmed(),
    }
}

/// Format a list of projects as pretty output
pub fn format_projects_pretty(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "Projects (0)\n  No projects".to_string();
    }

    let mut output = format!("Projects ({})\n", projects.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for project in projects {
        output.push_str(&format!(
            "{} {}  {}\n",
            "▸".white(),
            project.name.bold(),
            project.id.dimmed()
        ));
    }

    output
}

/// Format a list of tasks as a pretty table
pub fn format_tasks_pretty(tasks: &[Task], title: &str) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 items)\n  No items");
    }

    let mut output = format!("{} ({} items)\n", title, tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        let mut line = format!("{} {}", priority_badge(task.priority), task.title.bold());

        if let Some(project) = &task.project_id {
            line.push_str(&format!("  {}", project.dimmed()));
        }

        line.push_str(&format!("  {}", task.id.dimmed()));
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single task as pretty output
pub fn format_task_pretty(task: &Task) -> String {
    let mut output = format!("{} {}\n", priority_badge(task.priority), task.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!("  {}: {}\n", "Priority".dimmed(), task.priority));

    if let Some(project) = &task.project_id {
        output.push_str(&format!("  {}: {}\n", "Project".dimmed(), project));
    }

    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), description));
    }

    output
}

/// Format a single project as pretty output
pub fn format_project_pretty(project: &Project) -> String {
    format!(
        "{} {}\n  {}: {}\n",
        "▸".white(),
        project.name.bold(),
        "ID".dimmed(),
        project.id
    )
}

/// Format the signed-in user as pretty output
pub fn format_user_pretty(user: &User) -> String {
    let name = user.name.as_deref().unwrap_or("(unnamed)");
    let mut output = format!("{} {}\n", "Signed in as".dimmed(), name.bold());

    if let Some(email) = &user.email {
        output.push_str(&format!("  {}: {}\n", "Email".dimmed(), email));
    }
    if let Some(id) = &user.id {
        output.push_str(&format!("  {}: {}\n", "ID".dimmed(), id));
    }

    output
}
