use js_sys::{
    Function,
    Reflect,
};
use pagekit_shortcuts::PageActions;
use tracing::{
    debug,
    warn,
};
use wasm_bindgen::{
    JsCast,
    JsValue,
};
use web_sys::{
    Element,
    HtmlElement,
    HtmlInputElement,
};

use crate::config::ActionSelectors;
use crate::dom::{
    document,
    window,
};
use crate::error::WebResult;

/// Default shortcut targets found with CSS selectors.
#[derive(Debug, Clone)]
pub struct DomPageActions {
    selectors: ActionSelectors,
}

impl DomPageActions {
    pub fn new(selectors: ActionSelectors) -> Self {
        Self { selectors }
    }

    fn query(&self, selector: &str) -> WebResult<Option<Element>> {
        Ok(document()?.query_selector(selector)?)
    }

    fn click(element: &Element) {
        match element.dyn_ref::<HtmlElement>() {
            Some(html) => html.click(),
            None => debug!("Element <{}> is not clickable", element.tag_name()),
        }
    }

    fn submit(&self) -> WebResult<()> {
        let Some(form) = self.query(&self.selectors.form)? else {
            debug!("No form to submit");
            return Ok(());
        };
        if form.query_selector(&self.selectors.form_search)?.is_some() {
            debug!("First form is a search form, not submitting");
            return Ok(());
        }
        if let Some(button) = form.query_selector(&self.selectors.submit)? {
            Self::click(&button);
        }
        Ok(())
    }

    fn focus_search_input(&self) -> WebResult<()> {
        let Some(element) = self.query(&self.selectors.search_input)? else {
            debug!("No search input on page");
            return Ok(());
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.focus()?;
            input.select();
        } else if let Some(html) = element.dyn_ref::<HtmlElement>() {
            html.focus()?;
        }
        Ok(())
    }

    fn hide_dialog(&self) -> WebResult<()> {
        let Some(dialog) = self.query(&self.selectors.dialog)? else {
            return Ok(());
        };
        if hide_with_bootstrap(&dialog)? {
            return Ok(());
        }
        if let Some(dismiss) = dialog.query_selector(&self.selectors.dialog_dismiss)? {
            Self::click(&dismiss);
        }
        Ok(())
    }

    fn follow(&self, href_fragment: &str) -> WebResult<()> {
        let selector = format!(r#"a[href*="{}"]"#, escape_attribute_value(href_fragment));
        match self.query(&selector)? {
            Some(link) => Self::click(&link),
            None => debug!("No link containing '{}'", href_fragment),
        }
        Ok(())
    }
}

/// Hides `dialog` through `bootstrap.Modal.getInstance(dialog).hide()` when
/// the page loads Bootstrap. Returns `false` when Bootstrap or an instance for
/// the dialog is missing.
fn hide_with_bootstrap(dialog: &Element) -> WebResult<bool> {
    let window = window()?;
    let bootstrap = Reflect::get(&window, &JsValue::from_str("bootstrap"))?;
    if bootstrap.is_undefined() || bootstrap.is_null() {
        return Ok(false);
    }
    let modal = Reflect::get(&bootstrap, &JsValue::from_str("Modal"))?;
    let Ok(get_instance) = Reflect::get(&modal, &JsValue::from_str("getInstance"))
        .and_then(|value| value.dyn_into::<Function>())
    else {
        return Ok(false);
    };

    let instance = get_instance.call1(&modal, dialog)?;
    if instance.is_undefined() || instance.is_null() {
        return Ok(false);
    }
    let hide = Reflect::get(&instance, &JsValue::from_str("hide"))?.dyn_into::<Function>()?;
    hide.call0(&instance)?;
    Ok(true)
}

fn escape_attribute_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

impl PageActions for DomPageActions {
    fn submit_primary_form(&self) {
        if let Err(e) = self.submit() {
            warn!("Save shortcut failed: {}", e);
        }
    }

    fn focus_search(&self) {
        if let Err(e) = self.focus_search_input() {
            warn!("Search shortcut failed: {}", e);
        }
    }

    fn close_dialog(&self) {
        if let Err(e) = self.hide_dialog() {
            warn!("Close dialog shortcut failed: {}", e);
        }
    }

    fn follow_link(&self, href_fragment: &str) {
        if let Err(e) = self.follow(href_fragment) {
            warn!("Navigation shortcut '{}' failed: {}", href_fragment, e);
        }
    }
}
