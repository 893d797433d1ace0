use std::cell::RefCell;
use std::rc::Rc;

use pagekit_shortcuts::{
    Dispatch,
    KeyEvent,
    ShortcutRegistry,
};
use tracing::{
    debug,
    warn,
};
use wasm_bindgen::prelude::*;
use web_sys::{
    Document,
    KeyboardEvent,
};

use crate::dom::{
    WebDocument,
    document,
};
use crate::error::WebResult;

pub fn key_event(event: &KeyboardEvent) -> KeyEvent {
    KeyEvent {
        key: event.key(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        alt: event.alt_key(),
        shift: event.shift_key(),
    }
}

/// Document-level `keydown` listener feeding a shared registry. Removed from
/// the document when dropped.
pub struct KeyboardListener {
    document: Document,
    callback: Closure<dyn FnMut(KeyboardEvent)>,
}

impl KeyboardListener {
    pub fn install(registry: Rc<RefCell<ShortcutRegistry>>) -> WebResult<Self> {
        let document = document()?;
        let callback = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            on_keydown(&registry, &event);
        });
        document.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())?;
        debug!("Installed keydown listener");

        Ok(Self { document, callback })
    }
}

impl Drop for KeyboardListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .document
            .remove_event_listener_with_callback("keydown", self.callback.as_ref().unchecked_ref())
        {
            warn!("Failed to remove keydown listener: {:?}", e);
        }
    }
}

fn on_keydown(registry: &Rc<RefCell<ShortcutRegistry>>, event: &KeyboardEvent) {
    let key_event = key_event(event);

    // The borrow ends here so the handlers can change the registry.
    let (outcome, entries) = match registry.try_borrow() {
        Ok(registry) => registry.resolve(&key_event, &WebDocument),
        Err(_) => {
            warn!("Shortcut registry busy, dropping '{}'", key_event.key);
            return;
        }
    };

    if let Dispatch::Handled(combos) = outcome {
        event.prevent_default();
        for (combo, entry) in combos.iter().zip(entries) {
            debug!("Dispatching shortcut '{}'", combo);
            (entry.handler)();
        }
    }
}
