use crate::models::{
    PageAlert,
    ToastId,
};
use crate::render::RenderedToast;

/// The container element every toast is appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub id: String,
    pub class_name: &'static str,
    pub aria_live: &'static str,
    pub aria_atomic: &'static str,
}

impl ContainerSpec {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            class_name: "toast-container",
            aria_live: "polite",
            aria_atomic: "true",
        }
    }
}

/// Document operations the notifier needs.
///
/// Toast operations address elements by id and must tolerate an element
/// that is already gone: timers fire after manual dismissal.
pub trait ToastHost: Send + Sync {
    /// Finds the container by id or creates it. Returns `true` when it was
    /// created.
    fn ensure_container(&self, container: &ContainerSpec) -> bool;

    fn append_toast(&self, container_id: &str, toast: &RenderedToast);

    fn set_toast_shown(&self, id: ToastId, shown: bool);

    fn remove_toast(&self, id: ToastId);

    fn has_toast(&self, id: ToastId) -> bool;

    fn page_alerts(&self, selector: &str) -> Vec<PageAlert>;

    /// Hides an alert returned by the last `page_alerts` call without
    /// removing it from the document. Toasts appended since then must not
    /// shift which element is hidden.
    fn hide_alert(&self, alert: &PageAlert);
}
