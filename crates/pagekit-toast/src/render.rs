use crate::models::{
    Toast,
    ToastId,
};

pub const TOAST_CLASS: &str = "toast-notification";
pub const SHOWN_CLASS: &str = "show";
pub const CLOSE_CLASS: &str = "toast-close";

/// Everything a host needs to put one toast element on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedToast {
    pub id: ToastId,
    pub element_id: String,
    pub class_name: String,
    pub role: &'static str,
    pub inner_html: String,
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_toast(toast: &Toast) -> RenderedToast {
    let inner_html = format!(
        concat!(
            r#"<div class="toast-content">"#,
            r#"<i class="bi {icon}"></i>"#,
            r#"<span>{message}</span>"#,
            r#"</div>"#,
            r#"<button type="button" class="{close}" aria-label="Close">"#,
            r#"<i class="bi bi-x"></i>"#,
            r#"</button>"#,
        ),
        icon = toast.kind.icon(),
        message = escape_html(&toast.message),
        close = CLOSE_CLASS,
    );

    RenderedToast {
        id: toast.id,
        element_id: toast.id.element_id(),
        class_name: format!("{} toast-{}", TOAST_CLASS, toast.kind_name),
        role: "alert",
        inner_html,
    }
}
