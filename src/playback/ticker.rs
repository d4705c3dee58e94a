use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// A repeating timer task.
///
/// [`Ticker::start`] spawns the task and returns its only stop capability. Stopping (or dropping)
/// aborts the task. On a multi-thread runtime a callback already running may finish, and an
/// overdue task may run a few more callbacks before it observes the abort, so callers that need a
/// hard cutoff must also guard the callback body.
#[derive(Debug)]
pub(crate) struct Ticker {
    task: JoinHandle<()>,
}

impl Ticker {
    /// Call `on_tick` every `period`, first one `period` after this call.
    pub(crate) fn start<F>(runtime: &Handle, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let first = Instant::now() + period;
        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                on_tick();
            }
        });
        Self { task }
    }

    pub(crate) fn stop(self) {
        drop(self);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Install and cancel counts for the timers owned by one engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerStats {
    pub installed: u64,
    pub cancelled: u64,
}

impl TimerStats {
    /// Timers installed and not yet cancelled.
    pub fn active(&self) -> u64 {
        self.installed - self.cancelled
    }
}
