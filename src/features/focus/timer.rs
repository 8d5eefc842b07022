//! Session timer state machine.
//!
//! The timer is pure state. Every transition returns the [`Effect`]s the
//! caller has to carry out (ticking, remote session calls), which keeps the
//! machine testable without a runtime or a network.

use chrono::Duration;

use crate::api::{SessionMode, StartSession, WorkSession};

/// Default pomodoro length: 25 minutes.
pub const DEFAULT_POMODORO_SECONDS: u64 = 25 * 60;

/// Timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Not started; no session.
    Idle,
    /// Ticking.
    Running,
    /// Frozen; the session stays open.
    Paused,
    /// Pomodoro ran out; waiting for a stop.
    Expired,
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
            Self::Expired => write!(f, "Time's up"),
        }
    }
}

/// Link between a timer run and its remote work session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLink {
    /// Create request in flight.
    Pending,
    /// Session created on the server.
    Open(String),
    /// Creation failed; the run continues locally.
    LocalOnly,
}

/// Phase of the machine. Only non-idle phases carry a session link.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Running(SessionLink),
    Paused(SessionLink),
    Expired(SessionLink),
}

impl Phase {
    const fn link(&self) -> Option<&SessionLink> {
        match self {
            Self::Idle => None,
            Self::Running(link) | Self::Paused(link) | Self::Expired(link) => Some(link),
        }
    }

    fn link_mut(&mut self) -> Option<&mut SessionLink> {
        match self {
            Self::Idle => None,
            Self::Running(link) | Self::Paused(link) | Self::Expired(link) => Some(link),
        }
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Begin the one-second tick.
    StartTicking,
    /// Cancel the tick.
    StopTicking,
    /// Open a remote session for the given run.
    CreateSession { run: u64, request: StartSession },
    /// Close a remote session.
    CloseSession { session_id: String },
    /// The pomodoro reached zero.
    Expired,
}

/// Countdown / count-up timer mirrored to a remote work session.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    mode: SessionMode,
    pomodoro_seconds: u64,
    seconds: u64,
    phase: Phase,
    /// Number of the current (or last) run; bumped on every Idle → Running.
    run: u64,
}

impl SessionTimer {
    /// Create an idle timer.
    #[must_use]
    pub fn new(mode: SessionMode, pomodoro_seconds: u64) -> Self {
        let pomodoro_seconds = pomodoro_seconds.max(1);
        let mut timer = Self {
            mode,
            pomodoro_seconds,
            seconds: 0,
            phase: Phase::Idle,
            run: 0,
        };
        timer.seconds = timer.default_seconds(mode);
        timer
    }

    /// Idle 25-minute pomodoro.
    #[must_use]
    pub fn pomodoro() -> Self {
        Self::new(SessionMode::Pomodoro, DEFAULT_POMODORO_SECONDS)
    }

    /// Starting value for a mode.
    #[must_use]
    pub const fn default_seconds(&self, mode: SessionMode) -> u64 {
        match mode {
            SessionMode::Pomodoro => self.pomodoro_seconds,
            SessionMode::Stopwatch => 0,
        }
    }

    /// Start or resume.
    ///
    /// From `Idle` this opens a new run and requests a session. From
    /// `Paused` it resumes the existing one. Otherwise it does nothing.
    pub fn start(&mut self, task_id: Option<&str>) -> Vec<Effect> {
        match &self.phase {
            Phase::Idle => {
                self.run += 1;
                self.phase = Phase::Running(SessionLink::Pending);
                vec![
                    Effect::StartTicking,
                    Effect::CreateSession {
                        run: self.run,
                        request: StartSession {
                            task_id: task_id.map(str::to_string),
                            mode: self.mode,
                        },
                    },
                ]
            }
            Phase::Paused(link) => {
                self.phase = Phase::Running(link.clone());
                vec![Effect::StartTicking]
            }
            Phase::Running(_) | Phase::Expired(_) => Vec::new(),
        }
    }

    /// Pause a running timer.
    pub fn pause(&mut self) -> Vec<Effect> {
        match &self.phase {
            Phase::Running(link) => {
                self.phase = Phase::Paused(link.clone());
                vec![Effect::StopTicking]
            }
            _ => Vec::new(),
        }
    }

    /// Start when not running, pause when running.
    pub fn toggle(&mut self, task_id: Option<&str>) -> Vec<Effect> {
        if self.is_running() {
            self.pause()
        } else {
            self.start(task_id)
        }
    }

    /// Stop the run, close its session and reset the value.
    ///
    /// Stopping an idle timer does nothing.
    pub fn stop(&mut self) -> Vec<Effect> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let mut effects = Vec::new();

        let link = match phase {
            Phase::Idle => return effects,
            Phase::Running(link) => {
                effects.push(Effect::StopTicking);
                link
            }
            Phase::Paused(link) | Phase::Expired(link) => link,
        };

        // A pending create is closed when its response arrives for a stale run.
        if let SessionLink::Open(session_id) = link {
            effects.push(Effect::CloseSession { session_id });
        }

        self.seconds = self.default_seconds(self.mode);
        effects
    }

    /// Stop, then return to pomodoro mode.
    pub fn reset(&mut self) -> Vec<Effect> {
        let effects = self.stop();
        self.set_mode(SessionMode::Pomodoro);
        effects
    }

    /// Switch mode. Only allowed while idle; returns whether it was applied.
    pub fn set_mode(&mut self, mode: SessionMode) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.mode = mode;
        self.seconds = self.default_seconds(mode);
        true
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Vec<Effect> {
        let Phase::Running(link) = &self.phase else {
            return Vec::new();
        };

        match self.mode {
            SessionMode::Pomodoro => {
                self.seconds = self.seconds.saturating_sub(1);
                if self.seconds == 0 {
                    self.phase = Phase::Expired(link.clone());
                    return vec![Effect::StopTicking, Effect::Expired];
                }
            }
            SessionMode::Stopwatch => {
                self.seconds = self.seconds.saturating_add(1);
            }
        }
        Vec::new()
    }

    /// Record the server's answer to a create request.
    ///
    /// Returns a close effect when the answer belongs to a run that has
    /// already been stopped, so no session is left open by accident.
    pub fn session_created(&mut self, run: u64, session: &WorkSession) -> Vec<Effect> {
        if run == self.run {
            if let Some(link) = self.phase.link_mut() {
                if *link == SessionLink::Pending {
                    *link = SessionLink::Open(session.id.clone());
                    return Vec::new();
                }
            }
        }

        vec![Effect::CloseSession {
            session_id: session.id.clone(),
        }]
    }

    /// Record a failed create request. Returns whether the current run was affected.
    pub fn session_failed(&mut self, run: u64) -> bool {
        if run != self.run {
            return false;
        }
        match self.phase.link_mut() {
            Some(link) if *link == SessionLink::Pending => {
                *link = SessionLink::LocalOnly;
                true
            }
            _ => false,
        }
    }

    /// Identifier of the open remote session.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        match self.phase.link() {
            Some(SessionLink::Open(id)) => Some(id),
            _ => None,
        }
    }

    /// Link of the current run, `None` while idle.
    #[must_use]
    pub const fn link(&self) -> Option<&SessionLink> {
        self.phase.link()
    }

    /// Get the current state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        match self.phase {
            Phase::Idle => TimerState::Idle,
            Phase::Running(_) => TimerState::Running,
            Phase::Paused(_) => TimerState::Paused,
            Phase::Expired(_) => TimerState::Expired,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Remaining (pomodoro) or elapsed (stopwatch) seconds.
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    #[must_use]
    pub const fn run(&self) -> u64 {
        self.run
    }

    #[must_use]
    pub const fn pomodoro_seconds(&self) -> u64 {
        self.pomodoro_seconds
    }

    /// Check if the timer is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Get progress as a fraction (0.0 - 1.0). Always 0 for the stopwatch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        match self.mode {
            SessionMode::Pomodoro => 1.0 - (self.seconds as f64 / self.pomodoro_seconds as f64),
            SessionMode::Stopwatch => 0.0,
        }
    }

    /// Format the displayed value as MM:SS.
    #[must_use]
    pub fn format(&self) -> String {
        #[allow(clippy::cast_possible_wrap)]
        format_duration_mmss(Duration::seconds(self.seconds as i64))
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::pomodoro()
    }
}

/// Format a duration as MM:SS.
#[must_use]
pub fn format_duration_mmss(d: Duration) -> String {
    let total_seconds = d.num_seconds().abs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Parse a duration string like "25m", "1h30m", "90s".
///
/// Returns `None` for malformed, zero or out-of-range input.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    // Try parsing as just a number (assume minutes)
    if let Ok(minutes) = s.parse::<i64>() {
        return positive_seconds(minutes.checked_mul(60)?);
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: i64 = current_num.parse().ok()?;
            current_num.clear();

            let seconds = match c {
                'h' => num.checked_mul(3600)?,
                'm' => num.checked_mul(60)?,
                's' => num,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(seconds)?;
        } else {
            return None;
        }
    }

    // Handle trailing number without unit (assume minutes)
    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    positive_seconds(total_seconds)
}

fn positive_seconds(seconds: i64) -> Option<Duration> {
    if seconds > 0 {
        Duration::try_seconds(seconds)
    } else {
        None
    }
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creates(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::CreateSession { .. }))
            .count()
    }

    fn closes(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::CloseSession { .. }))
            .count()
    }

    fn session(id: &str) -> WorkSession {
        WorkSession {
            id: id.to_string(),
            task_id: None,
            mode: SessionMode::Pomodoro,
            started_at: None,
            stopped_at: None,
        }
    }

    /// Start and immediately acknowledge the create request.
    fn start_open(timer: &mut SessionTimer, id: &str) {
        let effects = timer.start(None);
        assert_eq!(creates(&effects), 1);
        let run = timer.run();
        assert!(timer.session_created(run, &session(id)).is_empty());
    }

    #[test]
    fn test_timer_new() {
        let timer = SessionTimer::pomodoro();
        assert_eq!(timer.seconds(), 1500);
        assert_eq!(timer.state(), TimerState::Idle);
        assert!(timer.session_id().is_none());
        assert!(timer.link().is_none());
    }

    #[test]
    fn test_start_requests_session_with_task() {
        let mut timer = SessionTimer::pomodoro();
        let effects = timer.start(Some("task-7"));

        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(
            effects,
            vec![
                Effect::StartTicking,
                Effect::CreateSession {
                    run: 1,
                    request: StartSession {
                        task_id: Some("task-7".to_string()),
                        mode: SessionMode::Pomodoro,
                    },
                },
            ]
        );
        assert_eq!(timer.link(), Some(&SessionLink::Pending));
    }

    #[test]
    fn test_three_ticks() {
        let mut timer = SessionTimer::pomodoro();
        timer.start(None);

        for _ in 0..3 {
            assert!(timer.tick().is_empty());
        }

        assert_eq!(timer.seconds(), 1497);
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.format(), "24:57");
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut timer = SessionTimer::pomodoro();
        start_open(&mut timer, "s1");

        assert!(timer.start(None).is_empty());
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.session_id(), Some("s1"));
    }

    #[test]
    fn test_pause_then_start_reuses_session() {
        let mut timer = SessionTimer::pomodoro();
        start_open(&mut timer, "s1");
        timer.tick();

        assert_eq!(timer.pause(), vec![Effect::StopTicking]);
        assert_eq!(timer.state(), TimerState::Paused);

        // Frozen while paused
        assert!(timer.tick().is_empty());
        assert_eq!(timer.seconds(), 1499);

        let effects = timer.start(None);
        assert_eq!(effects, vec![Effect::StartTicking]);
        assert_eq!(creates(&effects), 0);
        assert_eq!(timer.session_id(), Some("s1"));
    }

    #[test]
    fn test_stop_closes_once_and_resets() {
        let mut timer = SessionTimer::pomodoro();
        start_open(&mut timer, "s1");
        timer.tick();
        timer.tick();

        let effects = timer.stop();
        assert_eq!(
            effects,
            vec![
                Effect::StopTicking,
                Effect::CloseSession {
                    session_id: "s1".to_string()
                },
            ]
        );
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.seconds(), 1500);
        assert!(timer.session_id().is_none());

        // Double stop is a no-op
        assert!(timer.stop().is_empty());
    }

    #[test]
    fn test_stop_while_idle_is_noop() {
        let mut timer = SessionTimer::pomodoro();
        assert!(timer.stop().is_empty());
        assert_eq!(timer.seconds(), 1500);
    }

    #[test]
    fn test_stop_from_paused_does_not_stop_ticking_twice() {
        let mut timer = SessionTimer::pomodoro();
        start_open(&mut timer, "s1");
        timer.pause();

        let effects = timer.stop();
        assert_eq!(
            effects,
            vec![Effect::CloseSession {
                session_id: "s1".to_string()
            }]
        );
    }

    #[test]
    fn test_pomodoro_expires_at_zero() {
        let mut timer = SessionTimer::new(SessionMode::Pomodoro, 2);
        start_open(&mut timer, "s1");

        assert!(timer.tick().is_empty());
        assert_eq!(timer.tick(), vec![Effect::StopTicking, Effect::Expired]);
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(timer.seconds(), 0);

        // Clamped and inert
        assert!(timer.tick().is_empty());
        assert!(timer.start(None).is_empty());
        assert_eq!(timer.seconds(), 0);

        // Session stays open until stopped
        assert_eq!(timer.session_id(), Some("s1"));
        assert_eq!(closes(&timer.stop()), 1);
        assert_eq!(timer.seconds(), 2);
    }

    #[test]
    fn test_stopwatch_counts_up() {
        let mut timer = SessionTimer::new(SessionMode::Stopwatch, DEFAULT_POMODORO_SECONDS);
        assert_eq!(timer.seconds(), 0);
        timer.start(None);

        let mut last = timer.seconds();
        for _ in 0..5000 {
            timer.tick();
            assert!(timer.seconds() > last);
            last = timer.seconds();
        }
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.format(), "83:20");
    }

    #[test]
    fn test_mode_switch_while_idle_resets() {
        let mut timer = SessionTimer::pomodoro();

        assert!(timer.set_mode(SessionMode::Stopwatch));
        assert_eq!(timer.seconds(), 0);

        assert!(timer.set_mode(SessionMode::Pomodoro));
        assert_eq!(timer.seconds(), 1500);
    }

    #[test]
    fn test_mode_switch_rejected_while_active() {
        let mut timer = SessionTimer::pomodoro();
        start_open(&mut timer, "s1");
        timer.tick();

        assert!(!timer.set_mode(SessionMode::Stopwatch));
        assert_eq!(timer.mode(), SessionMode::Pomodoro);
        assert_eq!(timer.seconds(), 1499);
        assert_eq!(timer.session_id(), Some("s1"));
    }

    #[test]
    fn test_reset_closes_session_and_returns_to_pomodoro() {
        let mut timer = SessionTimer::new(SessionMode::Stopwatch, DEFAULT_POMODORO_SECONDS);
        start_open(&mut timer, "s1");
        timer.tick();

        let effects = timer.reset();
        assert_eq!(closes(&effects), 1);
        assert_eq!(timer.mode(), SessionMode::Pomodoro);
        assert_eq!(timer.seconds(), 1500);
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_toggle() {
        let mut timer = SessionTimer::pomodoro();
        assert_eq!(creates(&timer.toggle(None)), 1);
        assert!(timer.is_running());
        timer.toggle(None);
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(creates(&timer.toggle(None)), 0);
        assert!(timer.is_running());
    }

    #[test]
    fn test_late_create_for_stopped_run_is_closed() {
        let mut timer = SessionTimer::pomodoro();
        timer.start(None);
        let run = timer.run();

        // Stopped before the server answered: nothing to close yet.
        assert_eq!(closes(&timer.stop()), 0);

        let effects = timer.session_created(run, &session("late"));
        assert_eq!(
            effects,
            vec![Effect::CloseSession {
                session_id: "late".to_string()
            }]
        );
        assert!(timer.session_id().is_none());
    }

    #[test]
    fn test_create_for_previous_run_is_closed() {
        let mut timer = SessionTimer::pomodoro();
        timer.start(None);
        let old_run = timer.run();
        timer.stop();
        timer.start(None);

        assert_eq!(closes(&timer.session_created(old_run, &session("old"))), 1);
        assert_eq!(timer.link(), Some(&SessionLink::Pending));

        let run = timer.run();
        assert!(timer.session_created(run, &session("new")).is_empty());
        assert_eq!(timer.session_id(), Some("new"));
    }

    #[test]
    fn test_create_acknowledged_while_paused() {
        let mut timer = SessionTimer::pomodoro();
        timer.start(None);
        timer.pause();

        let run = timer.run();
        assert!(timer.session_created(run, &session("s1")).is_empty());
        assert_eq!(timer.session_id(), Some("s1"));
        assert_eq!(timer.state(), TimerState::Paused);
    }

    #[test]
    fn test_failed_create_runs_locally() {
        let mut timer = SessionTimer::pomodoro();
        timer.start(None);
        let run = timer.run();

        assert!(timer.session_failed(run));
        assert_eq!(timer.link(), Some(&SessionLink::LocalOnly));
        assert!(timer.is_running());

        timer.tick();
        assert_eq!(timer.seconds(), 1499);

        // Nothing to close for a local-only run
        assert_eq!(timer.stop(), vec![Effect::StopTicking]);
        assert!(!timer.session_failed(run));
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Start,
        Pause,
        Stop,
    }

    /// Every Start/Pause/Stop sequence of the given length.
    fn sequences(len: usize) -> Vec<Vec<Op>> {
        let mut all = vec![Vec::new()];
        for _ in 0..len {
            all = all
                .into_iter()
                .flat_map(|seq: Vec<Op>| {
                    [Op::Start, Op::Pause, Op::Stop].into_iter().map(move |op| {
                        let mut next = seq.clone();
                        next.push(op);
                        next
                    })
                })
                .collect();
        }
        all
    }

    #[test]
    fn test_at_most_one_open_session_for_all_sequences() {
        for seq in (1..=7).flat_map(sequences) {
            let mut timer = SessionTimer::pomodoro();
            let mut open = false;

            for op in &seq {
                let before = timer.seconds();
                let effects = match op {
                    Op::Start => timer.start(None),
                    Op::Pause => timer.pause(),
                    Op::Stop => timer.stop(),
                };

                if matches!(op, Op::Stop) {
                    open = false;
                }
                if creates(&effects) == 1 {
                    assert!(!open, "sequence {seq:?} opened two sessions");
                    open = true;
                    let run = timer.run();
                    let id = format!("s{run}");
                    assert!(timer.session_created(run, &session(&id)).is_empty());
                }

                let was_running = timer.is_running();
                let current = timer.seconds();
                timer.tick();
                assert!(timer.seconds() <= 1500);
                if was_running {
                    assert_eq!(timer.seconds(), current - 1);
                } else {
                    assert_eq!(timer.seconds(), current);
                }
                if matches!(op, Op::Pause) {
                    assert!(timer.seconds() <= before);
                }

                // A session id never exists without a non-idle state
                if timer.is_idle() {
                    assert!(timer.session_id().is_none(), "sequence {seq:?}");
                }
            }
        }
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("25"), Some(Duration::minutes(25)));
        assert_eq!(parse_duration("25m"), Some(Duration::minutes(25)));
    }

    #[test]
    fn test_parse_duration_compound() {
        assert_eq!(parse_duration("1h"), Some(Duration::hours(1)));
        assert_eq!(parse_duration("2h30m"), Some(Duration::minutes(150)));
        assert_eq!(parse_duration("1m30s"), Some(Duration::seconds(90)));
    }

    #[test]
    fn test_parse_duration_out_of_range() {
        assert!(parse_duration("99999999999999999").is_none());
        assert!(parse_duration("9999999999999999h").is_none());
        assert!(parse_duration("9223372036854775807s1s").is_none());
        assert!(parse_duration("99999999999999999999m").is_none());
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_none());
        assert!(parse_duration("abc").is_none());
        assert!(parse_duration("0").is_none());
        assert!(parse_duration("5x").is_none());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(25)), "25 minutes");
        assert_eq!(format_duration(Duration::minutes(1)), "1 minute");
        assert_eq!(format_duration(Duration::minutes(90)), "1 hour, 30 minutes");
        assert_eq!(format_duration(Duration::seconds(42)), "42 seconds");
    }

    #[test]
    fn test_format_duration_mmss() {
        assert_eq!(format_duration_mmss(Duration::minutes(25)), "25:00");
        assert_eq!(format_duration_mmss(Duration::seconds(90)), "01:30");
        assert_eq!(format_duration_mmss(Duration::minutes(75)), "75:00");
    }

    #[test]
    fn test_render_progress_bar() {
        let bar = render_progress_bar(0.5, 10);
        assert!(bar.contains("█████"));
        assert!(bar.contains("░░░░░"));
        assert_eq!(render_progress_bar(2.0, 4), "[████]");
    }
}
