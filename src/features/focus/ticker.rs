//! One-second tick source for the session timer.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::controller::TimerEvent;

/// Owns at most one interval task. Dropping the ticker cancels it.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    /// One tick per second.
    #[must_use]
    pub const fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Start ticking into `events`. Any previous interval is cancelled first.
    pub fn start(&mut self, events: UnboundedSender<TimerEvent>) {
        self.stop();

        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if events.send(TimerEvent::Tick).is_err() {
                    break;
                }
            }
        }));
    }

    /// Cancel the interval, if any.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
