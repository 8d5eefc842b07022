//! Drives a [`SessionTimer`] against the remote session API.
//!
//! Effects from the state machine are executed here: the ticker is started
//! and cancelled, and session create/close calls are spawned onto the
//! runtime. Their results come back as [`TimerEvent`]s on the same channel
//! as the ticks, so all timer state is mutated from one place.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use super::ticker::Ticker;
use super::timer::{Effect, SessionLink, SessionTimer, TimerState};
use crate::api::{RetryPolicy, SessionMode, StartSession, Task, WorkSession};
use crate::core::SessionApi;
use crate::error::BlitzError;

/// Input to the controller.
#[derive(Debug)]
pub enum TimerEvent {
    /// One second elapsed.
    Tick,
    /// A create request finished.
    SessionCreated {
        run: u64,
        result: Result<WorkSession, BlitzError>,
    },
    /// A close request finished.
    SessionClosed {
        session_id: String,
        result: Result<(), BlitzError>,
    },
}

/// Session lifecycle notifications for the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerNotice {
    SessionStarted(WorkSession),
    SessionStopped { session_id: String },
    /// The pomodoro ran out.
    Completed,
    /// A session boundary call failed after all retries.
    SyncFailed(String),
}

pub struct SessionController {
    timer: SessionTimer,
    api: Arc<dyn SessionApi>,
    retry: RetryPolicy,
    ticker: Ticker,
    events: UnboundedSender<TimerEvent>,
    /// Sessions whose close request failed; retried before the next start.
    unclosed: Vec<String>,
    /// Parked closes sent by the last start and not yet answered.
    flushing: Vec<String>,
    /// Create held back until `flushing` drains.
    deferred: Option<(u64, StartSession)>,
    in_flight: usize,
    auto_stop: bool,
}

impl SessionController {
    #[must_use]
    pub fn new(
        timer: SessionTimer,
        api: Arc<dyn SessionApi>,
        retry: RetryPolicy,
        events: UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            timer,
            api,
            retry,
            ticker: Ticker::every_second(),
            events,
            unclosed: Vec::new(),
            flushing: Vec::new(),
            deferred: None,
            in_flight: 0,
            auto_stop: false,
        }
    }

    /// Close the session as soon as a pomodoro runs out.
    #[must_use]
    pub fn with_auto_stop(mut self, auto_stop: bool) -> Self {
        self.auto_stop = auto_stop;
        self
    }

    #[must_use]
    pub const fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    #[must_use]
    pub fn unclosed(&self) -> &[String] {
        &self.unclosed
    }

    /// Requests spawned but not yet reported back.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    /// Start or resume, focused on `task`.
    ///
    /// A new run first retries any parked closes; its create request is
    /// sent once they have all answered.
    pub fn start(&mut self, task: Option<&Task>) -> Vec<TimerNotice> {
        if self.timer.is_idle() {
            self.flush_unclosed();
        }
        let effects = self.timer.start(task.map(|t| t.id.as_str()));
        self.apply(effects)
    }

    pub fn pause(&mut self) -> Vec<TimerNotice> {
        let effects = self.timer.pause();
        self.apply(effects)
    }

    /// Start when not running, pause when running.
    pub fn toggle(&mut self, task: Option<&Task>) -> Vec<TimerNotice> {
        if self.timer.is_running() {
            self.pause()
        } else {
            self.start(task)
        }
    }

    pub fn stop(&mut self) -> Vec<TimerNotice> {
        let effects = self.timer.stop();
        self.apply(effects)
    }

    pub fn reset(&mut self) -> Vec<TimerNotice> {
        let effects = self.timer.reset();
        self.apply(effects)
    }

    /// Switch mode while idle. Returns whether the switch was applied.
    pub fn set_mode(&mut self, mode: SessionMode) -> bool {
        self.timer.set_mode(mode)
    }

    /// Feed an event from the channel.
    pub fn handle(&mut self, event: TimerEvent) -> Vec<TimerNotice> {
        match event {
            TimerEvent::Tick => {
                let effects = self.timer.tick();
                self.apply(effects)
            }
            TimerEvent::SessionCreated { run, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.session_created(run, result)
            }
            TimerEvent::SessionClosed { session_id, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.flushing.retain(|id| *id != session_id);
                let notices = match result {
                    Ok(()) => {
                        info!(%session_id, "session closed");
                        vec![TimerNotice::SessionStopped { session_id }]
                    }
                    Err(error) => {
                        warn!(%session_id, %error, "failed to close session");
                        let notice = TimerNotice::SyncFailed(format!(
                            "Could not close session {session_id}: {error}"
                        ));
                        self.unclosed.push(session_id);
                        vec![notice]
                    }
                };
                if self.flushing.is_empty() {
                    self.release_deferred();
                }
                notices
            }
        }
    }

    /// Stop the timer and wait for every outstanding session call.
    ///
    /// Late create responses are closed, and sessions whose close failed
    /// earlier get one more attempt. Gives up at `deadline`.
    pub async fn finish(
        &mut self,
        events: &mut UnboundedReceiver<TimerEvent>,
        deadline: Duration,
    ) -> Vec<TimerNotice> {
        let mut notices = self.stop();
        self.ticker.stop();
        let until = Instant::now() + deadline;

        while self.in_flight > 0 {
            match timeout_at(until, events.recv()).await {
                Ok(Some(event)) => notices.extend(self.handle(event)),
                Ok(None) | Err(_) => {
                    warn!(in_flight = self.in_flight, "gave up waiting for session requests");
                    break;
                }
            }
        }

        for session_id in std::mem::take(&mut self.unclosed) {
            let api = Arc::clone(&self.api);
            let result = self
                .retry
                .run("stop session", || {
                    let api = Arc::clone(&api);
                    let session_id = session_id.clone();
                    async move { api.stop_session(&session_id).await }
                })
                .await;
            notices.extend(self.handle(TimerEvent::SessionClosed { session_id, result }));
        }

        notices
    }

    fn session_created(&mut self, run: u64, result: Result<WorkSession, BlitzError>) -> Vec<TimerNotice> {
        match result {
            Ok(session) => {
                let effects = self.timer.session_created(run, &session);
                if effects.is_empty() {
                    info!(session_id = %session.id, run, "session started");
                    vec![TimerNotice::SessionStarted(session)]
                } else {
                    debug!(session_id = %session.id, run, "closing session of a stopped run");
                    self.apply(effects)
                }
            }
            Err(error) => {
                if self.timer.session_failed(run) {
                    warn!(%error, run, "failed to start session; continuing locally");
                    vec![TimerNotice::SyncFailed(format!(
                        "Could not start session (timer runs locally): {error}"
                    ))]
                } else {
                    debug!(%error, run, "create failed for a stopped run");
                    Vec::new()
                }
            }
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Vec<TimerNotice> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::StartTicking => self.ticker.start(self.events.clone()),
                Effect::StopTicking => self.ticker.stop(),
                Effect::CreateSession { run, request } => {
                    if self.flushing.is_empty() {
                        self.spawn_create(run, request);
                    } else {
                        debug!(run, pending = self.flushing.len(), "create waits for parked closes");
                        self.deferred = Some((run, request));
                    }
                }
                Effect::CloseSession { session_id } => self.spawn_close(session_id),
                Effect::Expired => {
                    info!(run = self.timer.run(), "pomodoro complete");
                    notices.push(TimerNotice::Completed);
                    if self.auto_stop && self.timer.state() == TimerState::Expired {
                        let stop = self.timer.stop();
                        notices.extend(self.apply(stop));
                    }
                }
            }
        }
        notices
    }

    fn flush_unclosed(&mut self) {
        for session_id in std::mem::take(&mut self.unclosed) {
            debug!(%session_id, "retrying close before new start");
            self.flushing.push(session_id.clone());
            self.spawn_close(session_id);
        }
    }

    /// Send the held-back create if its run is still waiting for a session.
    fn release_deferred(&mut self) {
        let Some((run, request)) = self.deferred.take() else {
            return;
        };
        if run == self.timer.run() && self.timer.link() == Some(&SessionLink::Pending) {
            self.spawn_create(run, request);
        } else {
            debug!(run, "dropping create of a stopped run");
        }
    }

    fn spawn_create(&mut self, run: u64, request: StartSession) {
        self.in_flight += 1;
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let retry = self.retry;

        tokio::spawn(async move {
            let result = retry
                .run("start session", || {
                    let api = Arc::clone(&api);
                    let request = request.clone();
                    async move { api.start_session(&request).await }
                })
                .await;
            events.send(TimerEvent::SessionCreated { run, result }).ok();
        });
    }

    fn spawn_close(&mut self, session_id: String) {
        self.in_flight += 1;
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let retry = self.retry;

        tokio::spawn(async move {
            let result = retry
                .run("stop session", || {
                    let api = Arc::clone(&api);
                    let session_id = session_id.clone();
                    async move { api.stop_session(&session_id).await }
                })
                .await;
            events
                .send(TimerEvent::SessionClosed { session_id, result })
                .ok();
        });
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::api::Priority;
    use crate::core::MockSessionApi;

    fn session(id: &str) -> WorkSession {
        WorkSession {
            id: id.to_string(),
            task_id: None,
            mode: SessionMode::Pomodoro,
            started_at: None,
            stopped_at: None,
        }
    }

    fn unavailable() -> BlitzError {
        BlitzError::Api {
            status: 503,
            message: "unavailable".to_string(),
        }
    }

    fn controller_with(
        timer: SessionTimer,
        api: MockSessionApi,
    ) -> (SessionController, UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = SessionController::new(timer, Arc::new(api), RetryPolicy::none(), tx);
        (controller, rx)
    }

    fn controller(api: MockSessionApi) -> (SessionController, UnboundedReceiver<TimerEvent>) {
        controller_with(SessionTimer::pomodoro(), api)
    }

    /// Handle events until a session request reports back.
    async fn pump(
        controller: &mut SessionController,
        rx: &mut UnboundedReceiver<TimerEvent>,
    ) -> Vec<TimerNotice> {
        loop {
            let event = rx.recv().await.unwrap();
            let is_tick = matches!(event, TimerEvent::Tick);
            let notices = controller.handle(event);
            if !is_tick {
                return notices;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_sends_task_and_mode() {
        let mut api = MockSessionApi::new();
        api.expect_start_session()
            .withf(|req| req.task_id.as_deref() == Some("t1") && req.mode == SessionMode::Pomodoro)
            .times(1)
            .returning(|_| Ok(session("s1")));

        let (mut controller, mut rx) = controller(api);
        let task = Task {
            id: "t1".to_string(),
            title: "Write report".to_string(),
            description: None,
            priority: Priority::High,
            project_id: None,
        };

        assert!(controller.start(Some(&task)).is_empty());
        assert!(controller.is_ticking());

        let notices = pump(&mut controller, &mut rx).await;
        assert_eq!(notices, vec![TimerNotice::SessionStarted(session("s1"))]);
        assert_eq!(controller.timer().session_id(), Some("s1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_ticks_after_start() {
        let mut api = MockSessionApi::new();
        api.expect_start_session()
            .times(1)
            .returning(|_| Ok(session("s1")));

        let (mut controller, mut rx) = controller(api);
        controller.start(None);

        let mut ticks = 0;
        while ticks < 3 {
            let event = rx.recv().await.unwrap();
            if matches!(event, TimerEvent::Tick) {
                ticks += 1;
            }
            controller.handle(event);
        }

        assert_eq!(controller.timer().seconds(), 1497);
        assert_eq!(controller.timer().state(), TimerState::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_then_start_creates_once() {
        let mut api = MockSessionApi::new();
        api.expect_start_session()
            .times(1)
            .returning(|_| Ok(session("s1")));
        api.expect_stop_session().never();

        let (mut controller, mut rx) = controller(api);
        controller.start(None);
        pump(&mut controller, &mut rx).await;

        controller.pause();
        assert!(!controller.is_ticking());
        controller.start(None);
        controller.start(None);

        assert!(controller.is_ticking());
        assert_eq!(controller.in_flight(), 0);
        assert_eq!(controller.timer().session_id(), Some("s1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_closes_exactly_once() {
        let mut api = MockSessionApi::new();
        api.expect_start_session()
            .times(1)
            .returning(|_| Ok(session("s1")));
        api.expect_stop_session()
            .withf(|id| id == "s1")
            .times(1)
            .returning(|_| Ok(()));

        let (mut controller, mut rx) = controller(api);
        controller.start(None);
        pump(&mut controller, &mut rx).await;

        controller.stop();
        assert!(!controller.is_ticking());
        assert_eq!(controller.timer().seconds(), 1500);

        let notices = pump(&mut controller, &mut rx).await;
        assert_eq!(
            notices,
            vec![TimerNotice::SessionStopped {
                session_id: "s1".to_string()
            }]
        );

        // Second stop: idle, no request
        assert!(controller.stop().is_empty());
        assert_eq!(controller.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_create_runs_locally() {
        let mut api = MockSessionApi::new();
        api.expect_start_session()
            .times(1)
            .returning(|_| Err(unavailable()));
        api.expect_stop_session().never();

        let (mut controller, mut rx) = controller(api);
        controller.start(None);

        let notices = pump(&mut controller, &mut rx).await;
        assert!(matches!(notices.as_slice(), [TimerNotice::SyncFailed(_)]));
        assert!(controller.timer().is_running());
        assert!(controller.is_ticking());

        assert!(controller.stop().is_empty());
        assert_eq!(controller.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_close_is_retried_before_next_start() {
        let mut api = MockSessionApi::new();
        let mut created = 0;
        api.expect_start_session().times(2).returning(move |_| {
            created += 1;
            Ok(session(&format!("s{created}")))
        });
        let mut closes = 0;
        api.expect_stop_session()
            .withf(|id| id == "s1")
            .times(2)
            .returning(move |_| {
                closes += 1;
                if closes == 1 {
                    Err(unavailable())
                } else {
                    Ok(())
                }
            });

        let (mut controller, mut rx) = controller(api);
        controller.start(None);
        pump(&mut controller, &mut rx).await;
        controller.stop();

        let notices = pump(&mut controller, &mut rx).await;
        assert!(matches!(notices.as_slice(), [TimerNotice::SyncFailed(_)]));
        assert_eq!(controller.unclosed(), ["s1".to_string()]);

        controller.start(None);
        assert!(controller.unclosed().is_empty());
        // Only the parked close is on the wire; the create waits for it.
        assert_eq!(controller.in_flight(), 1);

        let notices = pump(&mut controller, &mut rx).await;
        assert_eq!(
            notices,
            vec![TimerNotice::SessionStopped {
                session_id: "s1".to_string()
            }]
        );
        assert_eq!(controller.in_flight(), 1);

        let notices = pump(&mut controller, &mut rx).await;
        assert_eq!(notices, vec![TimerNotice::SessionStarted(session("s2"))]);
        assert_eq!(controller.timer().session_id(), Some("s2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_while_create_waits_drops_it() {
        let mut api = MockSessionApi::new();
        api.expect_start_session()
            .times(1)
            .returning(|_| Ok(session("s1")));
        let mut closes = 0;
        api.expect_stop_session()
            .withf(|id| id == "s1")
            .times(2)
            .returning(move |_| {
                closes += 1;
                if closes == 1 {
                    Err(unavailable())
                } else {
                    Ok(())
                }
            });

        let (mut controller, mut rx) = controller(api);
        controller.start(None);
        pump(&mut controller, &mut rx).await;
        controller.stop();
        pump(&mut controller, &mut rx).await;

        controller.start(None);
        controller.stop();

        let notices = pump(&mut controller, &mut rx).await;
        assert_eq!(
            notices,
            vec![TimerNotice::SessionStopped {
                session_id: "s1".to_string()
            }]
        );
        assert_eq!(controller.in_flight(), 0);
        assert!(controller.timer().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_before_create_returns_closes_late_session() {
        let mut api = MockSessionApi::new();
        api.expect_start_session()
            .times(1)
            .returning(|_| Ok(session("late")));
        api.expect_stop_session()
            .withf(|id| id == "late")
            .times(1)
            .returning(|_| Ok(()));

        let (mut controller, mut rx) = controller(api);
        controller.start(None);
        assert!(controller.stop().is_empty());

        // The create answer is stale: no start notice, a close goes out.
        assert!(pump(&mut controller, &mut rx).await.is_empty());
        let notices = pump(&mut controller, &mut rx).await;
        assert_eq!(
            notices,
            vec![TimerNotice::SessionStopped {
                session_id: "late".to_string()
            }]
        );
        assert!(controller.timer().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_stop_on_expiry() {
        let mut api = MockSessionApi::new();
        api.expect_start_session()
            .times(1)
            .returning(|_| Ok(session("s1")));
        api.expect_stop_session()
            .times(1)
            .returning(|_| Ok(()));

        let (controller, mut rx) = controller_with(SessionTimer::new(SessionMode::Pomodoro, 2), api);
        let mut controller = controller.with_auto_stop(true);
        controller.start(None);

        let mut seen = Vec::new();
        while !seen.iter().any(|n| matches!(n, TimerNotice::SessionStopped { .. })) {
            let event = rx.recv().await.unwrap();
            seen.extend(controller.handle(event));
        }

        assert!(seen.contains(&TimerNotice::Completed));
        assert!(controller.timer().is_idle());
        assert_eq!(controller.timer().seconds(), 2);
        assert!(!controller.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_without_auto_stop_keeps_session_open() {
        let mut api = MockSessionApi::new();
        api.expect_start_session()
            .times(1)
            .returning(|_| Ok(session("s1")));
        api.expect_stop_session().never();

        let (mut controller, mut rx) =
            controller_with(SessionTimer::new(SessionMode::Pomodoro, 2), api);
        controller.start(None);

        let mut seen = Vec::new();
        while !seen.contains(&TimerNotice::Completed) {
            let event = rx.recv().await.unwrap();
            seen.extend(controller.handle(event));
        }

        assert_eq!(controller.timer().state(), TimerState::Expired);
        assert_eq!(controller.timer().seconds(), 0);
        assert_eq!(controller.timer().session_id(), Some("s1"));
        assert!(!controller.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_switch_only_while_idle() {
        let mut api = MockSessionApi::new();
        api.expect_start_session()
            .times(1)
            .returning(|_| Ok(session("s1")));

        let (mut controller, _rx) = controller(api);
        assert!(controller.set_mode(SessionMode::Stopwatch));
        assert_eq!(controller.timer().seconds(), 0);

        controller.start(None);
        assert!(!controller.set_mode(SessionMode::Pomodoro));
        assert_eq!(controller.timer().mode(), SessionMode::Stopwatch);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_waits_for_pending_create() {
        let mut api = MockSessionApi::new();
        api.expect_start_session()
            .times(1)
            .returning(|_| Ok(session("s1")));
        api.expect_stop_session()
            .withf(|id| id == "s1")
            .times(1)
            .returning(|_| Ok(()));

        let (mut controller, mut rx) = controller(api);
        controller.start(None);

        let notices = controller.finish(&mut rx, Duration::from_secs(5)).await;
        assert_eq!(
            notices,
            vec![TimerNotice::SessionStopped {
                session_id: "s1".to_string()
            }]
        );
        assert_eq!(controller.in_flight(), 0);
        assert!(!controller.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_retries_unclosed_sessions() {
        let mut api = MockSessionApi::new();
        api.expect_start_session()
            .times(1)
            .returning(|_| Ok(session("s1")));
        let mut closes = 0;
        api.expect_stop_session().times(2).returning(move |_| {
            closes += 1;
            if closes == 1 {
                Err(unavailable())
            } else {
                Ok(())
            }
        });

        let (mut controller, mut rx) = controller(api);
        controller.start(None);
        pump(&mut controller, &mut rx).await;
        controller.stop();
        pump(&mut controller, &mut rx).await;
        assert_eq!(controller.unclosed().len(), 1);

        let notices = controller.finish(&mut rx, Duration::from_secs(5)).await;
        assert!(notices.contains(&TimerNotice::SessionStopped {
            session_id: "s1".to_string()
        }));
        assert!(controller.unclosed().is_empty());
    }
}
