use pagekit_shortcuts::{
    FocusProbe,
    FocusedElement,
};
use pagekit_toast::render::{
    CLOSE_CLASS,
    SHOWN_CLASS,
    TOAST_CLASS,
};
use pagekit_toast::{
    ContainerSpec,
    PageAlert,
    RenderedToast,
    ToastHost,
    ToastId,
};
use tracing::{
    debug,
    warn,
};
use wasm_bindgen::prelude::*;
use web_sys::{
    Document,
    Element,
    HtmlElement,
    Window,
};

use crate::error::{
    WebError,
    WebResult,
};

/// Marks a container whose close-button listener is installed.
const BOUND_ATTRIBUTE: &str = "data-pagekit-bound";

/// Tags the alerts of the current sweep with their index.
const ALERT_ATTRIBUTE: &str = "data-pagekit-alert";

pub fn window() -> WebResult<Window> {
    web_sys::window().ok_or(WebError::NoWindow)
}

pub fn document() -> WebResult<Document> {
    window()?.document().ok_or(WebError::NoDocument)
}

/// Runs `callback` once the document is parsed: immediately when it already
/// is, otherwise on `DOMContentLoaded`.
pub fn on_dom_ready<F>(callback: F) -> WebResult<()>
where
    F: FnOnce() + 'static,
{
    let document = document()?;
    if document.ready_state() != "loading" {
        callback();
        return Ok(());
    }

    let listener = Closure::once_into_js(callback);
    document.add_event_listener_with_callback("DOMContentLoaded", listener.unchecked_ref())?;
    Ok(())
}

/// The live page document.
///
/// Holds no JavaScript objects; every call looks the document up again, so
/// the value can be shared with timer callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebDocument;

impl WebDocument {
    fn ensure(&self, spec: &ContainerSpec) -> WebResult<(Element, bool)> {
        let document = document()?;
        if let Some(container) = document.get_element_by_id(&spec.id) {
            bind_close_buttons(&container)?;
            return Ok((container, false));
        }

        let container = document.create_element("div")?;
        container.set_id(&spec.id);
        container.set_class_name(spec.class_name);
        container.set_attribute("aria-live", spec.aria_live)?;
        container.set_attribute("aria-atomic", spec.aria_atomic)?;
        document
            .body()
            .ok_or(WebError::NoBody)?
            .append_child(&container)?;
        bind_close_buttons(&container)?;
        Ok((container, true))
    }

    fn append(&self, container_id: &str, toast: &RenderedToast) -> WebResult<()> {
        let (container, _) = self.ensure(&ContainerSpec::new(container_id))?;
        let element = document()?.create_element("div")?;
        element.set_id(&toast.element_id);
        element.set_class_name(&toast.class_name);
        element.set_attribute("role", toast.role)?;
        element.set_inner_html(&toast.inner_html);
        container.append_child(&element)?;
        Ok(())
    }

    fn toast_element(&self, id: ToastId) -> Option<Element> {
        document().ok()?.get_element_by_id(&id.element_id())
    }

    fn set_shown(&self, id: ToastId, shown: bool) -> WebResult<()> {
        let Some(element) = self.toast_element(id) else {
            debug!("Toast {} already removed", id);
            return Ok(());
        };
        let classes = element.class_list();
        if shown {
            classes.add_1(SHOWN_CLASS)?;
        } else {
            classes.remove_1(SHOWN_CLASS)?;
        }
        Ok(())
    }

    fn alerts(&self, selector: &str) -> WebResult<Vec<PageAlert>> {
        let document = document()?;
        let stale = document.query_selector_all(&format!("[{}]", ALERT_ATTRIBUTE))?;
        for index in 0..stale.length() {
            if let Some(element) = stale
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            {
                element.remove_attribute(ALERT_ATTRIBUTE)?;
            }
        }

        let nodes = document.query_selector_all(selector)?;
        let mut alerts = Vec::with_capacity(nodes.length() as usize);
        for index in 0..nodes.length() {
            let Some(element) = nodes
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            element.set_attribute(ALERT_ATTRIBUTE, &index.to_string())?;
            alerts.push(PageAlert {
                index: index as usize,
                text: element.text_content().unwrap_or_default(),
                classes: element
                    .class_name()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect(),
            });
        }
        Ok(alerts)
    }

    fn hide(&self, alert: &PageAlert) -> WebResult<()> {
        let tagged = format!(r#"[{}="{}"]"#, ALERT_ATTRIBUTE, alert.index);
        let Some(element) = document()?
            .query_selector(&tagged)?
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        else {
            debug!("Alert {} no longer in the document", alert.index);
            return Ok(());
        };
        element.style().set_property("display", "none")?;
        element.remove_attribute(ALERT_ATTRIBUTE)?;
        Ok(())
    }
}

/// One delegated click listener per container removes the toast whose close
/// button was clicked.
fn bind_close_buttons(container: &Element) -> WebResult<()> {
    if container.has_attribute(BOUND_ATTRIBUTE) {
        return Ok(());
    }

    let close_selector = format!(".{}", CLOSE_CLASS);
    let toast_selector = format!(".{}", TOAST_CLASS);
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
        else {
            return;
        };
        let Ok(Some(button)) = target.closest(&close_selector) else {
            return;
        };
        if let Ok(Some(toast)) = button.closest(&toast_selector) {
            toast.remove();
        }
    });

    container.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    // The listener lives as long as the container, which lives as long as the page.
    on_click.forget();
    container.set_attribute(BOUND_ATTRIBUTE, "true")?;
    Ok(())
}

impl ToastHost for WebDocument {
    fn ensure_container(&self, container: &ContainerSpec) -> bool {
        match self.ensure(container) {
            Ok((_, created)) => created,
            Err(e) => {
                warn!("Failed to acquire toast container #{}: {}", container.id, e);
                false
            }
        }
    }

    fn append_toast(&self, container_id: &str, toast: &RenderedToast) {
        if let Err(e) = self.append(container_id, toast) {
            warn!("Failed to append toast {}: {}", toast.id, e);
        }
    }

    fn set_toast_shown(&self, id: ToastId, shown: bool) {
        if let Err(e) = self.set_shown(id, shown) {
            warn!("Failed to update toast {}: {}", id, e);
        }
    }

    fn remove_toast(&self, id: ToastId) {
        match self.toast_element(id) {
            Some(element) => element.remove(),
            None => debug!("Toast {} already removed", id),
        }
    }

    fn has_toast(&self, id: ToastId) -> bool {
        self.toast_element(id).is_some()
    }

    fn page_alerts(&self, selector: &str) -> Vec<PageAlert> {
        self.alerts(selector).unwrap_or_else(|e| {
            warn!("Failed to read page alerts '{}': {}", selector, e);
            Vec::new()
        })
    }

    fn hide_alert(&self, alert: &PageAlert) {
        if let Err(e) = self.hide(alert) {
            warn!("Failed to hide alert {}: {}", alert.index, e);
        }
    }
}

impl FocusProbe for WebDocument {
    fn focused_element(&self) -> Option<FocusedElement> {
        let element = document().ok()?.active_element()?;
        let content_editable = element
            .dyn_ref::<HtmlElement>()
            .is_some_and(|html| html.is_content_editable());
        Some(FocusedElement {
            tag_name: element.tag_name(),
            content_editable,
        })
    }
}
