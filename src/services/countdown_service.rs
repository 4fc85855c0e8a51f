use crate::utils::time::format_countdown;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Receives the formatted `mm:ss` remaining time on every tick.
#[cfg_attr(test, mockall::automock)]
pub trait CountdownDisplay: Send + Sync + 'static {
    fn show(&self, remaining: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    Running,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Remaining(String),
    /// The first tick at or past the deadline.
    Expired,
    /// Any tick after expiry has already fired.
    AlreadyFired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    Expired,
    Cancelled,
}

/// Deadline plus the one-shot `fired` flag.
#[derive(Debug, Clone)]
pub struct CountdownState {
    deadline: Instant,
    fired: bool,
}

impl CountdownState {
    pub fn new(start: Instant, duration: Duration) -> Self {
        Self {
            deadline: start + duration,
            fired: false,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn phase(&self) -> CountdownPhase {
        if self.fired {
            CountdownPhase::Expired
        } else {
            CountdownPhase::Running
        }
    }

    /// Remaining time is always derived from the absolute deadline.
    pub fn tick(&mut self, now: Instant) -> Tick {
        if self.fired {
            return Tick::AlreadyFired;
        }
        match self.deadline.checked_duration_since(now) {
            Some(remaining) if !remaining.is_zero() => {
                Tick::Remaining(format_countdown(remaining.as_secs()))
            }
            _ => {
                self.fired = true;
                Tick::Expired
            }
        }
    }
}

/// Cancels the periodic schedule. Cloning shares the same schedule.
#[derive(Debug, Clone)]
pub struct CountdownHandle {
    token: CancellationToken,
}

impl CountdownHandle {
    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            debug!("Cancelling countdown schedule");
            self.token.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Starts the periodic countdown. The first tick runs immediately.
///
/// `on_expire` runs at most once, on the tick where the deadline is reached,
/// after the schedule has been cancelled.
pub fn spawn_countdown<F, Fut>(
    duration: Duration,
    period: Duration,
    display: Arc<dyn CountdownDisplay>,
    on_expire: F,
) -> (CountdownHandle, JoinHandle<CountdownOutcome>)
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let token = CancellationToken::new();
    let handle = CountdownHandle {
        token: token.clone(),
    };
    let mut state = CountdownState::new(Instant::now(), duration);

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => return CountdownOutcome::Cancelled,
                _ = interval.tick() => {}
            }

            match state.tick(Instant::now()) {
                Tick::Remaining(text) => display.show(&text),
                Tick::Expired => {
                    info!("Countdown expired, forcing submission");
                    token.cancel();
                    on_expire().await;
                    return CountdownOutcome::Expired;
                }
                Tick::AlreadyFired => return CountdownOutcome::Expired,
            }
        }
    });

    (handle, task)
}
