use pagekit_shortcuts::ShortcutError;
use wasm_bindgen::JsValue;

pub type WebResult<T> = Result<T, WebError>;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("No global window object")]
    NoWindow,

    #[error("Window has no document")]
    NoDocument,

    #[error("Document has no body")]
    NoBody,

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Shortcut(#[from] ShortcutError),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<serde_json::Error> for WebError {
    fn from(error: serde_json::Error) -> Self {
        WebError::Config(error.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for WebError {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        WebError::Config(error.to_string())
    }
}
