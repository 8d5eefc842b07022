//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::api::{Priority, SessionMode};
use crate::features::focus::{SessionLink, TimerState};
use crate::tui::app::{App, Pane, Screen, Status};

const HELP: &str = "Space:start/pause | s:stop | m:mode | R:reset | Tab:pane | j/k:nav | \
Enter:select | p:project | a:task | r:refresh | q:quit";

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    match app.screen {
        Screen::Hero => render_hero(frame, app),
        Screen::Dashboard => render_dashboard(frame, app),
    }

    if app.show_help {
        render_help(frame);
    }
}

fn render_hero(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "⚡ BlitzNow",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Pick a task. Hit space. Do the work."),
        Line::from(""),
        Line::from(Span::styled(
            "Press d to try the demo account, q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let hero = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(hero, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_dashboard(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, body, prompt, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(if app.prompt.is_some() { 3 } else { 0 }),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(40),
            Constraint::Percentage(35),
        ])
        .split(chunks[1]);

    render_projects(frame, app, columns[0]);
    render_tasks(frame, app, columns[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(columns[2]);
    render_timer(frame, app, right[0]);
    render_details(frame, app, right[1]);

    if app.prompt.is_some() {
        render_prompt(frame, app, chunks[2]);
    }
    render_status_bar(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let who = app
        .user
        .as_ref()
        .and_then(|u| u.name.as_deref().or(u.email.as_deref()))
        .unwrap_or("signed in");
    let title = format!(" ⚡ BlitzNow  ·  {who} ");

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Cyan } else { Color::White };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn render_projects(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let selected = app.workspace.selection().project_id.as_deref();

    let mut items = vec![ListItem::new(project_line("All tasks", selected.is_none()))];
    items.extend(
        app.workspace
            .projects()
            .iter()
            .map(|p| ListItem::new(project_line(&p.name, selected == Some(p.id.as_str())))),
    );

    let list = List::new(items)
        .block(pane_block("Projects", app.pane == Pane::Projects))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.project_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn project_line(name: &str, active: bool) -> Line<'_> {
    let marker = if active { "▸ " } else { "  " };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(
            name,
            Style::default().add_modifier(if active {
                Modifier::BOLD
            } else {
                Modifier::empty()
            }),
        ),
    ])
}

fn render_tasks(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let focused_task = app.workspace.selection().task_id.as_deref();
    let tasks = app.workspace.visible_tasks();

    let items: Vec<ListItem<'_>> = tasks
        .iter()
        .map(|task| {
            let (badge, color) = match task.priority {
                Priority::High => ("!!!", Color::Red),
                Priority::Medium => ("!! ", Color::Yellow),
                Priority::Low => ("!  ", Color::DarkGray),
            };
            let is_focused = focused_task == Some(task.id.as_str());

            let mut spans = vec![
                Span::styled(format!("{badge} "), Style::default().fg(color)),
                Span::styled(
                    task.title.as_str(),
                    Style::default().add_modifier(if is_focused {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
            ];
            if is_focused {
                spans.push(Span::styled("  ⏱", Style::default().fg(Color::Green)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = app
        .workspace
        .current_project()
        .map_or("Tasks", |p| p.name.as_str());
    let list = List::new(items)
        .block(pane_block(title, app.pane == Pane::Tasks))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !tasks.is_empty() {
        state.select(Some(app.task_cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_timer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let timer = app.timer();
    let state_color = match timer.state() {
        TimerState::Idle => Color::DarkGray,
        TimerState::Running => Color::Green,
        TimerState::Paused => Color::Yellow,
        TimerState::Expired => Color::Magenta,
    };
    let sync = match timer.link() {
        None => "",
        Some(SessionLink::Pending) => "syncing…",
        Some(SessionLink::Open(_)) => "synced",
        Some(SessionLink::LocalOnly) => "local only",
    };

    let block = pane_block(timer.mode().display_name(), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let clock = Paragraph::new(Line::from(Span::styled(
        timer.format(),
        Style::default()
            .fg(state_color)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(clock, rows[0]);

    let label = Paragraph::new(Line::from(vec![
        Span::styled(timer.state().to_string(), Style::default().fg(state_color)),
        Span::styled(format!("  {sync}"), Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(label, rows[1]);

    if timer.mode() == SessionMode::Pomodoro {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(state_color))
            .ratio(timer.progress().clamp(0.0, 1.0))
            .label("");
        frame.render_widget(gauge, rows[2]);
    }
}

fn render_details(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut lines = Vec::new();

    match app.highlighted_task() {
        Some(task) => {
            lines.push(Line::from(Span::styled(
                task.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("Priority: {}", task.priority)));
            if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
                lines.push(Line::from(description));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "No task selected. Press a to add one.",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    if !app.workspace.history().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Sessions",
            Style::default().fg(Color::Cyan),
        )));
        for record in app.workspace.history().iter().rev().take(5) {
            let icon = if record.session.is_open() { "●" } else { "○" };
            let title = record.task_title.as_deref().unwrap_or("No task");
            lines.push(Line::from(format!(
                "{icon} {}  {title}",
                record.session.mode.display_name()
            )));
        }
    }

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(pane_block("Details", false));
    frame.render_widget(details, area);
}

fn render_prompt(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(prompt) = &app.prompt else {
        return;
    };
    let input = Paragraph::new(format!("{}▏", prompt.input)).block(
        Block::default()
            .title(format!(" {} (Enter to save, Esc to cancel) ", prompt.kind.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(input, area);
}

fn render_help(frame: &mut Frame<'_>) {
    let area = centered(frame.area(), 60, 12);
    let lines: Vec<Line<'_>> = HELP.split(" | ").map(Line::from).collect();
    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Keys (? to close) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, color) = match &app.status {
        Some(Status::Info(message)) => (message.as_str(), Color::DarkGray),
        Some(Status::Error(message)) => (message.as_str(), Color::Red),
        None => (HELP, Color::DarkGray),
    };

    let status = Paragraph::new(text).style(Style::default().fg(color));
    frame.render_widget(status, area);
}
