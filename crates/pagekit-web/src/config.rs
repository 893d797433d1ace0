use pagekit_shortcuts::ShortcutSettings;
use pagekit_toast::ToastSettings;
use serde::{
    Deserialize,
    Serialize,
};
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::error::WebResult;

/// Id of the optional `<script type="application/json">` element holding the
/// page configuration.
pub const CONFIG_ELEMENT_ID: &str = "pagekit-config";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_tracing(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }
}

/// Selectors the default page actions look targets up with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSelectors {
    #[serde(default = "default_form")]
    pub form: String,

    #[serde(default = "default_form_search")]
    pub form_search: String,

    #[serde(default = "default_submit")]
    pub submit: String,

    #[serde(default = "default_search_input")]
    pub search_input: String,

    #[serde(default = "default_dialog")]
    pub dialog: String,

    #[serde(default = "default_dialog_dismiss")]
    pub dialog_dismiss: String,
}

impl Default for ActionSelectors {
    fn default() -> Self {
        Self {
            form: default_form(),
            form_search: default_form_search(),
            submit: default_submit(),
            search_input: default_search_input(),
            dialog: default_dialog(),
            dialog_dismiss: default_dialog_dismiss(),
        }
    }
}

fn default_form() -> String {
    "form".to_string()
}

fn default_form_search() -> String {
    r#"[type="search"]"#.to_string()
}

fn default_submit() -> String {
    r#"button[type="submit"]"#.to_string()
}

fn default_search_input() -> String {
    r#"input[type="search"], input[name="search"]"#.to_string()
}

fn default_dialog() -> String {
    ".modal.show".to_string()
}

fn default_dialog_dismiss() -> String {
    r#"[data-bs-dismiss="modal"], .btn-close"#.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageKitConfig {
    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub shortcuts: ShortcutSettings,

    #[serde(default)]
    pub toast: ToastSettings,

    #[serde(default)]
    pub selectors: ActionSelectors,
}

impl PageKitConfig {
    pub fn from_json(json: &str) -> WebResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes the object passed from JavaScript; `undefined` and `null` mean
    /// "all defaults".
    pub fn from_js(value: JsValue) -> WebResult<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_wasm_bindgen::from_value(value)?)
    }

    /// Reads the configuration embedded in the page, if there is any.
    pub fn from_document(document: &Document) -> WebResult<Option<Self>> {
        let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
            return Ok(None);
        };
        let text = element.text_content().unwrap_or_default();
        if text.trim().is_empty() {
            return Ok(None);
        }
        Self::from_json(&text).map(Some)
    }
}
