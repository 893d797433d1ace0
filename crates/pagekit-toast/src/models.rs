use std::fmt;
use std::sync::atomic::{
    AtomicU64,
    Ordering,
};

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Exact, case-sensitive match on the kind names CSS classes use.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "bi-check-circle-fill",
            Self::Error => "bi-x-circle-fill",
            Self::Warning => "bi-exclamation-triangle-fill",
            Self::Info => "bi-info-circle-fill",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

/// Prefix of toast element ids, kept apart from ids the page renders itself
/// (Bootstrap's own `toast-*` markup, for one).
pub const ELEMENT_ID_PREFIX: &str = "pagekit-toast-";

/// Page-unique toast identifier. Shared by every notifier so toasts from
/// different notifiers never collide inside the shared container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToastId(u64);

impl ToastId {
    pub fn next() -> Self {
        Self(NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn element_id(&self) -> String {
        format!("{}{}", ELEMENT_ID_PREFIX, self.0)
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    /// Kind as given by the caller; used verbatim in the CSS class.
    pub kind_name: String,
    /// Resolved kind; unknown names fall back to info.
    pub kind: ToastKind,
    pub duration_ms: i64,
}

impl Toast {
    pub fn new(message: &str, kind_name: &str, duration_ms: i64) -> Self {
        Self {
            id: ToastId::next(),
            message: message.to_string(),
            kind_name: kind_name.to_string(),
            kind: ToastKind::from_name(kind_name).unwrap_or(ToastKind::Info),
            duration_ms,
        }
    }

    pub fn auto_dismisses(&self) -> bool {
        self.duration_ms > 0
    }
}

/// A server-rendered alert found during the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAlert {
    /// Position among the elements matching the alert selector.
    pub index: usize,
    pub text: String,
    pub classes: Vec<String>,
}

impl PageAlert {
    pub fn new(index: usize, text: &str, classes: &[&str]) -> Self {
        Self {
            index,
            text: text.to_string(),
            classes: classes.iter().map(|class| class.to_string()).collect(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|candidate| candidate == class)
    }

    pub fn kind(&self) -> ToastKind {
        if self.has_class("alert-success") {
            ToastKind::Success
        } else if self.has_class("alert-danger") {
            ToastKind::Error
        } else if self.has_class("alert-warning") {
            ToastKind::Warning
        } else {
            ToastKind::Info
        }
    }
}

pub type ToastResult<T> = Result<T, ToastError>;

#[derive(Debug, thiserror::Error)]
pub enum ToastError {
    #[error("No async runtime available: {0}")]
    NoRuntime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(ToastKind::from_name("success"), Some(ToastKind::Success));
        assert_eq!(ToastKind::from_name("error"), Some(ToastKind::Error));
        assert_eq!(ToastKind::from_name("warning"), Some(ToastKind::Warning));
        assert_eq!(ToastKind::from_name("info"), Some(ToastKind::Info));
        assert_eq!(ToastKind::from_name("Success"), None);
        assert_eq!(ToastKind::from_name("unknown-kind"), None);
    }

    #[test]
    fn test_unknown_kind_falls_back_to_info() {
        let toast = Toast::new("x", "unknown-kind", 0);
        assert_eq!(toast.kind, ToastKind::Info);
        assert_eq!(toast.kind_name, "unknown-kind");
        assert!(!toast.auto_dismisses());
    }

    #[test]
    fn test_toast_ids_are_unique() {
        let first = Toast::new("a", "info", 3000);
        let second = Toast::new("b", "info", 3000);
        assert_ne!(first.id, second.id);
        assert_ne!(first.id.element_id(), second.id.element_id());
    }

    #[test]
    fn test_element_id_is_namespaced() {
        let id = ToastId::next();
        assert_eq!(id.element_id(), format!("pagekit-toast-{}", id.value()));
        assert_ne!(id.element_id(), format!("toast-{}", id.value()));
    }

    #[test]
    fn test_alert_kind_from_classes() {
        assert_eq!(
            PageAlert::new(0, "ok", &["alert", "alert-success"]).kind(),
            ToastKind::Success
        );
        assert_eq!(
            PageAlert::new(0, "Error occurred", &["alert", "alert-danger"]).kind(),
            ToastKind::Error
        );
        assert_eq!(
            PageAlert::new(0, "careful", &["alert", "alert-warning", "fade"]).kind(),
            ToastKind::Warning
        );
        assert_eq!(
            PageAlert::new(0, "fyi", &["alert", "alert-primary"]).kind(),
            ToastKind::Info
        );
    }
}
