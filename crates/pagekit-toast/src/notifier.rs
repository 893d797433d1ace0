use std::sync::Arc;
use std::time::Duration;

use tracing::{
    debug,
    info,
};

use crate::host::{
    ContainerSpec,
    ToastHost,
};
use crate::models::{
    Toast,
    ToastId,
    ToastKind,
};
use crate::render::render_toast;
use crate::scheduler::Scheduler;
use crate::settings::ToastSettings;

/// Reference to a toast that was shown. Dropping it leaves the toast alone.
#[derive(Clone)]
pub struct ToastHandle {
    id: ToastId,
    kind: ToastKind,
    host: Arc<dyn ToastHost>,
}

impl ToastHandle {
    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    pub fn is_attached(&self) -> bool {
        self.host.has_toast(self.id)
    }

    /// Removes the toast immediately, as its close button does.
    pub fn dismiss(&self) {
        debug!("Dismissing toast {}", self.id);
        self.host.remove_toast(self.id);
    }
}

impl std::fmt::Debug for ToastHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastHandle")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct ToastNotifier {
    host: Arc<dyn ToastHost>,
    scheduler: Arc<dyn Scheduler>,
    settings: ToastSettings,
}

impl ToastNotifier {
    pub fn new(
        host: Arc<dyn ToastHost>, scheduler: Arc<dyn Scheduler>, settings: ToastSettings,
    ) -> Self {
        let container = ContainerSpec::new(&settings.container_id);
        if host.ensure_container(&container) {
            info!("Created toast container #{}", container.id);
        } else {
            debug!("Reusing toast container #{}", container.id);
        }

        Self {
            host,
            scheduler,
            settings,
        }
    }

    pub fn settings(&self) -> &ToastSettings {
        &self.settings
    }

    /// Appends a toast and schedules its entrance and, for a positive
    /// `duration_ms`, its exit. Unknown kinds keep their CSS class but use
    /// the info icon.
    pub fn show(&self, message: &str, kind: &str, duration_ms: i64) -> ToastHandle {
        let toast = Toast::new(message, kind, duration_ms);
        let rendered = render_toast(&toast);
        let id = toast.id;

        self.host
            .append_toast(&self.settings.container_id, &rendered);
        debug!(
            "Showing {} toast {} for {}ms",
            toast.kind_name, id, duration_ms
        );

        let host = self.host.clone();
        self.scheduler.schedule(
            Duration::from_millis(self.settings.entrance_delay_ms),
            Box::new(move || host.set_toast_shown(id, true)),
        );

        if toast.auto_dismisses() {
            let host = self.host.clone();
            let scheduler = self.scheduler.clone();
            let fade_out = Duration::from_millis(self.settings.fade_out_ms);
            self.scheduler.schedule(
                Duration::from_millis(duration_ms.unsigned_abs()),
                Box::new(move || {
                    host.set_toast_shown(id, false);
                    scheduler.schedule(fade_out, Box::new(move || host.remove_toast(id)));
                }),
            );
        }

        ToastHandle {
            id,
            kind: toast.kind,
            host: self.host.clone(),
        }
    }

    /// `show` with the configured default duration.
    pub fn show_default(&self, message: &str, kind: &str) -> ToastHandle {
        self.show(message, kind, self.settings.default_duration_ms)
    }

    pub fn success(&self, message: &str) -> ToastHandle {
        self.success_for(message, self.settings.duration_for(ToastKind::Success))
    }

    pub fn success_for(&self, message: &str, duration_ms: i64) -> ToastHandle {
        self.show(message, ToastKind::Success.name(), duration_ms)
    }

    pub fn error(&self, message: &str) -> ToastHandle {
        self.error_for(message, self.settings.duration_for(ToastKind::Error))
    }

    pub fn error_for(&self, message: &str, duration_ms: i64) -> ToastHandle {
        self.show(message, ToastKind::Error.name(), duration_ms)
    }

    pub fn warning(&self, message: &str) -> ToastHandle {
        self.warning_for(message, self.settings.duration_for(ToastKind::Warning))
    }

    pub fn warning_for(&self, message: &str, duration_ms: i64) -> ToastHandle {
        self.show(message, ToastKind::Warning.name(), duration_ms)
    }

    pub fn info(&self, message: &str) -> ToastHandle {
        self.info_for(message, self.settings.duration_for(ToastKind::Info))
    }

    pub fn info_for(&self, message: &str, duration_ms: i64) -> ToastHandle {
        self.show(message, ToastKind::Info.name(), duration_ms)
    }

    /// Converts server-rendered alerts into toasts and hides the originals.
    /// Alerts without text are left untouched. Every converted alert uses the
    /// default duration regardless of its kind.
    pub fn sweep_page_alerts(&self) -> usize {
        let selector = &self.settings.alert_selector;
        let mut converted = 0;

        for alert in self.host.page_alerts(selector) {
            let message = alert.text.trim();
            if message.is_empty() {
                continue;
            }

            self.show_default(message, alert.kind().name());
            self.host.hide_alert(&alert);
            converted += 1;
        }

        if converted > 0 {
            info!("Converted {} page alerts into toasts", converted);
        }
        converted
    }
}
