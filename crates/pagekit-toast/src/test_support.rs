use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::host::{
    ContainerSpec,
    ToastHost,
};
use crate::models::{
    PageAlert,
    ToastId,
};
use crate::render::RenderedToast;
use crate::scheduler::{
    Scheduler,
    Task,
};

#[derive(Debug, Clone)]
pub struct MemoryToast {
    pub rendered: RenderedToast,
    pub container_id: String,
    pub shown: bool,
}

#[derive(Default)]
struct MemoryState {
    containers: Vec<ContainerSpec>,
    toasts: Vec<MemoryToast>,
    alerts: Vec<(PageAlert, bool)>,
    detached_calls: usize,
}

/// In-memory document standing in for the DOM.
#[derive(Default)]
pub struct MemoryHost {
    state: Mutex<MemoryState>,
}

impl MemoryHost {
    pub fn with_alerts(alerts: Vec<PageAlert>) -> Self {
        let host = Self::default();
        host.state.lock().unwrap().alerts = alerts.into_iter().map(|a| (a, false)).collect();
        host
    }

    pub fn containers(&self) -> Vec<ContainerSpec> {
        self.state.lock().unwrap().containers.clone()
    }

    pub fn toasts(&self) -> Vec<MemoryToast> {
        self.state.lock().unwrap().toasts.clone()
    }

    pub fn toast(&self, id: ToastId) -> Option<MemoryToast> {
        self.toasts().into_iter().find(|t| t.rendered.id == id)
    }

    pub fn alert_hidden(&self, index: usize) -> bool {
        self.state
            .lock()
            .unwrap()
            .alerts
            .iter()
            .any(|(alert, hidden)| alert.index == index && *hidden)
    }

    pub fn alert_count(&self) -> usize {
        self.state.lock().unwrap().alerts.len()
    }

    /// Calls that addressed a toast no longer in the document.
    pub fn detached_calls(&self) -> usize {
        self.state.lock().unwrap().detached_calls
    }
}

impl ToastHost for MemoryHost {
    fn ensure_container(&self, container: &ContainerSpec) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.containers.iter().any(|c| c.id == container.id) {
            return false;
        }
        state.containers.push(container.clone());
        true
    }

    fn append_toast(&self, container_id: &str, toast: &RenderedToast) {
        self.state.lock().unwrap().toasts.push(MemoryToast {
            rendered: toast.clone(),
            container_id: container_id.to_string(),
            shown: false,
        });
    }

    fn set_toast_shown(&self, id: ToastId, shown: bool) {
        let mut state = self.state.lock().unwrap();
        match state.toasts.iter_mut().find(|t| t.rendered.id == id) {
            Some(toast) => toast.shown = shown,
            None => state.detached_calls += 1,
        }
    }

    fn remove_toast(&self, id: ToastId) {
        let mut state = self.state.lock().unwrap();
        let before = state.toasts.len();
        state.toasts.retain(|t| t.rendered.id != id);
        if state.toasts.len() == before {
            state.detached_calls += 1;
        }
    }

    fn has_toast(&self, id: ToastId) -> bool {
        self.state
            .lock()
            .unwrap()
            .toasts
            .iter()
            .any(|t| t.rendered.id == id)
    }

    fn page_alerts(&self, _selector: &str) -> Vec<PageAlert> {
        self.state
            .lock()
            .unwrap()
            .alerts
            .iter()
            .map(|(alert, _)| alert.clone())
            .collect()
    }

    fn hide_alert(&self, alert: &PageAlert) {
        let mut state = self.state.lock().unwrap();
        if let Some(entry) = state.alerts.iter_mut().find(|(a, _)| a.index == alert.index) {
            entry.1 = true;
        }
    }
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    seq: u64,
    pending: Vec<(Duration, u64, Task)>,
}

/// Scheduler driven by an explicit clock.
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.state.lock().unwrap().pending.len()
    }

    /// Moves the clock forward, running due tasks in deadline order. Tasks
    /// scheduled while advancing run too if they fall inside the window.
    pub fn advance(&self, by: Duration) {
        let target = self.state.lock().unwrap().now + by;
        loop {
            let task = {
                let mut state = self.state.lock().unwrap();
                let next = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (due, _, _))| *due <= target)
                    .min_by_key(|(_, (due, seq, _))| (*due, *seq))
                    .map(|(index, _)| index);
                match next {
                    Some(index) => {
                        let (due, _, task) = state.pending.remove(index);
                        state.now = due;
                        task
                    }
                    None => {
                        state.now = target;
                        break;
                    }
                }
            };
            task();
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let mut state = self.state.lock().unwrap();
        let due = state.now + delay;
        let seq = state.seq;
        state.seq += 1;
        state.pending.push((due, seq, task));
    }
}
