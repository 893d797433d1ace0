//! Browser bindings for pagekit.
//!
//! `PageKit.boot()` builds one shortcut registry and one toast notifier for
//! the page, installs the `keydown` listener and, once the DOM is parsed,
//! registers the default shortcuts and turns server-rendered alerts into
//! toasts. JavaScript keeps the returned object alive for the page lifetime.

pub mod actions;
pub mod config;
pub mod dom;
pub mod error;
pub mod keyboard;
pub mod logging;
pub mod timers;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use pagekit_shortcuts::{
    PageActions,
    ShortcutRegistry,
    create_registry,
    register_default_shortcuts,
};
use pagekit_toast::{
    ToastHandle,
    ToastNotifier,
};
use tracing::{
    info,
    warn,
};
use wasm_bindgen::prelude::*;

pub use crate::actions::DomPageActions;
pub use crate::config::PageKitConfig;
pub use crate::dom::WebDocument;
pub use crate::error::{
    WebError,
    WebResult,
};
pub use crate::keyboard::KeyboardListener;
pub use crate::timers::TimeoutScheduler;

/// A toast shown from JavaScript.
#[wasm_bindgen]
pub struct ToastRef {
    inner: ToastHandle,
}

#[wasm_bindgen]
impl ToastRef {
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.inner.id().element_id()
    }

    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        self.inner.kind().name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn attached(&self) -> bool {
        self.inner.is_attached()
    }

    pub fn dismiss(&self) {
        self.inner.dismiss();
    }
}

impl From<ToastHandle> for ToastRef {
    fn from(inner: ToastHandle) -> Self {
        Self { inner }
    }
}

#[wasm_bindgen]
pub struct PageKit {
    config: PageKitConfig,
    shortcuts: Rc<RefCell<ShortcutRegistry>>,
    toasts: ToastNotifier,
    _keyboard: KeyboardListener,
}

#[wasm_bindgen]
impl PageKit {
    /// Creates the registry, the notifier and the `keydown` listener without
    /// touching page content.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PageKit, JsError> {
        let config = PageKitConfig::from_js(config)?;
        Ok(Self::with_config(config)?)
    }

    /// `new` followed by the page-load wiring. Without an argument the
    /// configuration is read from `<script id="pagekit-config">`.
    pub fn boot(config: JsValue) -> Result<PageKit, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            PageKitConfig::from_document(&dom::document()?)?.unwrap_or_default()
        } else {
            PageKitConfig::from_js(config)?
        };
        let kit = Self::with_config(config)?;
        kit.on_page_ready()?;
        Ok(kit)
    }

    pub fn register(&self, combo: &str, handler: js_sys::Function, description: Option<String>) {
        let label = combo.to_string();
        self.shortcuts.borrow_mut().register(
            combo,
            move || {
                if let Err(e) = handler.call0(&JsValue::NULL) {
                    warn!("Shortcut '{}' handler threw: {:?}", label, e);
                }
            },
            description.as_deref().unwrap_or_default(),
        );
    }

    pub fn unregister(&self, combo: &str) {
        self.shortcuts.borrow_mut().unregister(combo);
    }

    /// Registered shortcuts as `[{combo, description}]`.
    pub fn shortcuts(&self) -> Result<JsValue, JsError> {
        let shortcuts = self.shortcuts.borrow().shortcuts();
        Ok(serde_wasm_bindgen::to_value(&shortcuts)?)
    }

    #[wasm_bindgen(js_name = "installDefaults")]
    pub fn install_defaults(&self) -> Result<(), JsError> {
        Ok(install_default_shortcuts(&self.shortcuts, &self.config)?)
    }

    #[wasm_bindgen(js_name = "sweepAlerts")]
    pub fn sweep_alerts(&self) -> u32 {
        self.toasts.sweep_page_alerts() as u32
    }

    pub fn show(
        &self, message: &str, kind: Option<String>, duration_ms: Option<i32>,
    ) -> ToastRef {
        let kind = kind.as_deref().unwrap_or("info");
        let handle = match duration_ms {
            Some(duration_ms) => self.toasts.show(message, kind, i64::from(duration_ms)),
            None => self.toasts.show_default(message, kind),
        };
        handle.into()
    }

    pub fn success(&self, message: &str, duration_ms: Option<i32>) -> ToastRef {
        match duration_ms {
            Some(duration_ms) => self.toasts.success_for(message, i64::from(duration_ms)),
            None => self.toasts.success(message),
        }
        .into()
    }

    pub fn error(&self, message: &str, duration_ms: Option<i32>) -> ToastRef {
        match duration_ms {
            Some(duration_ms) => self.toasts.error_for(message, i64::from(duration_ms)),
            None => self.toasts.error(message),
        }
        .into()
    }

    pub fn warning(&self, message: &str, duration_ms: Option<i32>) -> ToastRef {
        match duration_ms {
            Some(duration_ms) => self.toasts.warning_for(message, i64::from(duration_ms)),
            None => self.toasts.warning(message),
        }
        .into()
    }

    pub fn info(&self, message: &str, duration_ms: Option<i32>) -> ToastRef {
        match duration_ms {
            Some(duration_ms) => self.toasts.info_for(message, i64::from(duration_ms)),
            None => self.toasts.info(message),
        }
        .into()
    }
}

impl PageKit {
    pub fn with_config(config: PageKitConfig) -> WebResult<Self> {
        logging::init_logging(config.log_level);

        let shortcuts = Rc::new(RefCell::new(create_registry(&config.shortcuts)));
        let keyboard = KeyboardListener::install(shortcuts.clone())?;
        let toasts = ToastNotifier::new(
            Arc::new(WebDocument),
            Arc::new(TimeoutScheduler),
            config.toast.clone(),
        );

        info!("pagekit ready");
        Ok(Self {
            config,
            shortcuts,
            toasts,
            _keyboard: keyboard,
        })
    }

    pub fn registry(&self) -> Rc<RefCell<ShortcutRegistry>> {
        self.shortcuts.clone()
    }

    pub fn notifier(&self) -> &ToastNotifier {
        &self.toasts
    }

    /// Runs the default wiring and the alert sweep once the DOM is parsed.
    fn on_page_ready(&self) -> WebResult<()> {
        let shortcuts = self.shortcuts.clone();
        let toasts = self.toasts.clone();
        let config = self.config.clone();

        dom::on_dom_ready(move || {
            if config.shortcuts.install_defaults
                && let Err(e) = install_default_shortcuts(&shortcuts, &config)
            {
                warn!("Default shortcuts not installed: {}", e);
            }
            if config.toast.sweep_on_load {
                toasts.sweep_page_alerts();
            }
        })
    }
}

fn install_default_shortcuts(
    shortcuts: &Rc<RefCell<ShortcutRegistry>>, config: &PageKitConfig,
) -> WebResult<()> {
    let actions: Rc<dyn PageActions> = Rc::new(DomPageActions::new(config.selectors.clone()));
    register_default_shortcuts(&mut shortcuts.borrow_mut(), actions, &config.shortcuts)?;
    Ok(())
}
