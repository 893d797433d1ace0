use std::time::Duration;

use gloo_timers::callback::Timeout;
use pagekit_toast::{
    Scheduler,
    Task,
};

/// Longest delay `setTimeout` honours; larger values wrap negative and fire
/// at once.
const MAX_TIMEOUT_MS: u32 = i32::MAX as u32;

/// Schedules toast timers with `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        // Timers are never cancelled, so the handle is released to the browser.
        Timeout::new(timeout_millis(delay), task).forget();
    }
}

fn timeout_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis())
        .unwrap_or(MAX_TIMEOUT_MS)
        .min(MAX_TIMEOUT_MS)
}
