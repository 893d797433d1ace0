use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    info,
};

use crate::models::{
    Combo,
    FocusedElement,
    KeyEvent,
    Modifier,
    ShortcutInfo,
};
use crate::parser::ComboParser;

pub type ShortcutHandler = Rc<dyn Fn()>;

/// Reports the element that currently holds keyboard focus.
#[cfg_attr(test, mockall::automock)]
pub trait FocusProbe {
    fn focused_element(&self) -> Option<FocusedElement>;
}

fn is_text_input_focused(focus: &dyn FocusProbe) -> bool {
    focus
        .focused_element()
        .is_some_and(|element| element.is_text_input())
}

/// How the key of an unmodified keydown is matched against registrations.
///
/// Registrations are always lowercased. `Preserve` looks the raw event key up
/// as-is, so `Escape` never matches a registered `escape`; `Fold` lowercases
/// the event key first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BareKeyCasing {
    #[default]
    Preserve,
    Fold,
}

#[derive(Clone)]
pub struct ShortcutEntry {
    pub handler: ShortcutHandler,
    pub description: String,
}

impl std::fmt::Debug for ShortcutEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutEntry")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Handlers ran, ctrl before alt; the caller must suppress the browser
    /// default.
    Handled(Vec<Combo>),
    /// A bare-key handler exists but a text input has focus.
    Guarded(Combo),
    Unmatched,
}

impl Dispatch {
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

#[derive(Default)]
pub struct ShortcutRegistry {
    shortcuts: BTreeMap<Combo, ShortcutEntry>,
    bare_key_casing: BareKeyCasing,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bare_key_casing(bare_key_casing: BareKeyCasing) -> Self {
        Self {
            shortcuts: BTreeMap::new(),
            bare_key_casing,
        }
    }

    pub fn bare_key_casing(&self) -> BareKeyCasing {
        self.bare_key_casing
    }

    pub fn register<F>(&mut self, combo: &str, handler: F, description: &str)
    where
        F: Fn() + 'static,
    {
        self.register_handler(combo, Rc::new(handler), description);
    }

    pub fn register_handler(&mut self, combo: &str, handler: ShortcutHandler, description: &str) {
        let combo = ComboParser::from_registration(combo);
        self.insert(combo, handler, description);
    }

    /// Registers an already-parsed combo. Used for combos that went through
    /// the strict parser.
    pub fn insert(&mut self, combo: Combo, handler: ShortcutHandler, description: &str) {
        info!("Registering shortcut '{}': {}", combo, description);
        let entry = ShortcutEntry {
            handler,
            description: description.to_string(),
        };
        if self.shortcuts.insert(combo.clone(), entry).is_some() {
            debug!("Shortcut '{}' replaced an earlier registration", combo);
        }
    }

    pub fn unregister(&mut self, combo: &str) {
        let combo = ComboParser::from_registration(combo);
        if self.shortcuts.remove(&combo).is_some() {
            info!("Unregistered shortcut '{}'", combo);
        }
    }

    pub fn contains(&self, combo: &str) -> bool {
        self.shortcuts
            .contains_key(&ComboParser::from_registration(combo))
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    pub fn shortcuts(&self) -> Vec<ShortcutInfo> {
        self.shortcuts
            .iter()
            .map(|(combo, entry)| ShortcutInfo {
                combo: combo.to_string(),
                description: entry.description.clone(),
            })
            .collect()
    }

    /// The combos a keydown is looked up under, one per combo class it
    /// belongs to.
    pub fn lookup_combos(&self, event: &KeyEvent) -> Vec<Combo> {
        event
            .modifiers()
            .into_iter()
            .map(|modifier| {
                let key = match (modifier, self.bare_key_casing) {
                    (Modifier::None, BareKeyCasing::Preserve) => event.key.clone(),
                    _ => event.key.to_lowercase(),
                };
                Combo::new(modifier, key)
            })
            .collect()
    }

    /// Finds the entries a keydown should run without running them.
    ///
    /// Callers that share the registry behind a `RefCell` use this so the
    /// borrow ends before the handlers run.
    pub fn resolve(
        &self, event: &KeyEvent, focus: &dyn FocusProbe,
    ) -> (Dispatch, Vec<ShortcutEntry>) {
        let mut combos = Vec::new();
        let mut entries = Vec::new();

        for combo in self.lookup_combos(event) {
            let Some(entry) = self.shortcuts.get(&combo) else {
                continue;
            };

            // The bare class only exists without modifiers, so it is the
            // sole candidate here.
            if combo.is_bare() && is_text_input_focused(focus) {
                debug!("Shortcut '{}' suppressed while typing", combo);
                return (Dispatch::Guarded(combo), Vec::new());
            }

            combos.push(combo);
            entries.push(entry.clone());
        }

        if combos.is_empty() {
            (Dispatch::Unmatched, entries)
        } else {
            (Dispatch::Handled(combos), entries)
        }
    }

    pub fn dispatch(&self, event: &KeyEvent, focus: &dyn FocusProbe) -> Dispatch {
        let (outcome, entries) = self.resolve(event, focus);
        if let Dispatch::Handled(combos) = &outcome {
            for (combo, entry) in combos.iter().zip(entries) {
                debug!("Dispatching shortcut '{}'", combo);
                (entry.handler)();
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = count.clone();
        (count, move || handle.set(handle.get() + 1))
    }

    fn unfocused() -> MockFocusProbe {
        let mut focus = MockFocusProbe::new();
        focus
            .expect_focused_element()
            .returning(|| Some(FocusedElement::new("BODY")));
        focus
    }

    fn typing() -> MockFocusProbe {
        let mut focus = MockFocusProbe::new();
        focus
            .expect_focused_element()
            .returning(|| Some(FocusedElement::new("INPUT")));
        focus
    }

    #[test]
    fn test_registered_combo_fires_once_and_prevents_default() {
        let mut registry = ShortcutRegistry::new();
        let (count, handler) = counter();
        registry.register("ctrl+s", handler, "Save form");

        let outcome = registry.dispatch(&KeyEvent::new("s").with_ctrl(), &unfocused());

        assert_eq!(outcome, Dispatch::Handled(vec![Combo::ctrl("s")]));
        assert!(outcome.prevents_default());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_modified_combos_lowercase_the_event_key() {
        let mut registry = ShortcutRegistry::new();
        let (count, handler) = counter();
        registry.register("alt+d", handler, "");

        registry.dispatch(&KeyEvent::new("D").with_alt().with_shift(), &unfocused());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_meta_counts_as_ctrl() {
        let mut registry = ShortcutRegistry::new();
        let (count, handler) = counter();
        registry.register("ctrl+k", handler, "");

        registry.dispatch(&KeyEvent::new("k").with_meta(), &unfocused());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_ctrl_and_alt_classes_both_dispatch() {
        let mut registry = ShortcutRegistry::new();
        let (ctrl_count, ctrl_handler) = counter();
        let (alt_count, alt_handler) = counter();
        registry.register("ctrl+x", ctrl_handler, "");
        registry.register("alt+x", alt_handler, "");

        let outcome = registry.dispatch(&KeyEvent::new("x").with_ctrl().with_alt(), &unfocused());
        assert_eq!(
            outcome,
            Dispatch::Handled(vec![Combo::ctrl("x"), Combo::alt("x")])
        );
        assert_eq!(ctrl_count.get(), 1);
        assert_eq!(alt_count.get(), 1);
    }

    #[test]
    fn test_alt_combo_fires_when_ctrl_also_held() {
        let mut registry = ShortcutRegistry::new();
        let (count, handler) = counter();
        registry.register("alt+d", handler, "Go to dashboard");

        let outcome = registry.dispatch(&KeyEvent::new("d").with_ctrl().with_alt(), &unfocused());
        assert_eq!(outcome, Dispatch::Handled(vec![Combo::alt("d")]));
        assert!(outcome.prevents_default());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_bare_key_not_looked_up_with_modifiers() {
        let mut registry = ShortcutRegistry::new();
        let (count, handler) = counter();
        registry.register("d", handler, "");

        registry.dispatch(&KeyEvent::new("d").with_ctrl().with_alt(), &unfocused());
        registry.dispatch(&KeyEvent::new("d").with_alt(), &unfocused());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_unregister_stops_dispatch() {
        let mut registry = ShortcutRegistry::new();
        let (count, handler) = counter();
        registry.register("ctrl+s", handler, "");
        registry.unregister("CTRL+S");

        let outcome = registry.dispatch(&KeyEvent::new("s").with_ctrl(), &unfocused());
        assert_eq!(outcome, Dispatch::Unmatched);
        assert!(!outcome.prevents_default());
        assert_eq!(count.get(), 0);

        registry.unregister("ctrl+s");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reregistration_overwrites() {
        let mut registry = ShortcutRegistry::new();
        let (first, first_handler) = counter();
        let (second, second_handler) = counter();
        registry.register("alt+f", first_handler, "first");
        registry.register("ALT+F", second_handler, "second");

        registry.dispatch(&KeyEvent::new("f").with_alt(), &unfocused());
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.shortcuts()[0].description, "second");
    }

    #[test]
    fn test_bare_key_guarded_while_typing() {
        let mut registry = ShortcutRegistry::new();
        let (count, handler) = counter();
        registry.register("k", handler, "");

        let outcome = registry.dispatch(&KeyEvent::new("k"), &typing());
        assert_eq!(outcome, Dispatch::Guarded(Combo::bare("k")));
        assert!(!outcome.prevents_default());
        assert_eq!(count.get(), 0);

        registry.dispatch(&KeyEvent::new("k"), &unfocused());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_modified_combo_not_guarded_while_typing() {
        let mut registry = ShortcutRegistry::new();
        let (count, handler) = counter();
        registry.register("ctrl+s", handler, "");

        registry.dispatch(&KeyEvent::new("s").with_ctrl(), &typing());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_focus_probe_not_consulted_for_modified_combos() {
        let mut registry = ShortcutRegistry::new();
        let (_, handler) = counter();
        registry.register("alt+c", handler, "");

        let mut focus = MockFocusProbe::new();
        focus.expect_focused_element().never();
        registry.dispatch(&KeyEvent::new("c").with_alt(), &focus);
    }

    #[test]
    fn test_shift_only_never_dispatches() {
        let mut registry = ShortcutRegistry::new();
        let (count, handler) = counter();
        registry.register("k", handler, "");

        let outcome = registry.dispatch(&KeyEvent::new("k").with_shift(), &unfocused());
        assert_eq!(outcome, Dispatch::Unmatched);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_preserve_casing_keeps_raw_bare_key() {
        let mut registry = ShortcutRegistry::new();
        let (count, handler) = counter();
        registry.register("Escape", handler, "Close dialog");

        let outcome = registry.dispatch(&KeyEvent::new("Escape"), &unfocused());
        assert_eq!(outcome, Dispatch::Unmatched);
        assert_eq!(count.get(), 0);

        registry.dispatch(&KeyEvent::new("escape"), &unfocused());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_fold_casing_matches_mixed_case_keys() {
        let mut registry = ShortcutRegistry::with_bare_key_casing(BareKeyCasing::Fold);
        let (count, handler) = counter();
        registry.register("Escape", handler, "Close dialog");

        let outcome = registry.dispatch(&KeyEvent::new("Escape"), &unfocused());
        assert_eq!(outcome, Dispatch::Handled(vec![Combo::bare("escape")]));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_handler_may_reregister_through_resolve() {
        let registry = Rc::new(std::cell::RefCell::new(ShortcutRegistry::new()));
        let inner = registry.clone();
        registry.borrow_mut().register(
            "ctrl+k",
            move || inner.borrow_mut().register("ctrl+j", || {}, "added"),
            "",
        );

        let (_, entries) = registry
            .borrow()
            .resolve(&KeyEvent::new("k").with_ctrl(), &unfocused());
        for entry in entries {
            (entry.handler)();
        }
        assert!(registry.borrow().contains("ctrl+j"));
    }

    #[test]
    fn test_shortcuts_listing_is_sorted() {
        let mut registry = ShortcutRegistry::new();
        registry.register("alt+d", || {}, "Go to dashboard");
        registry.register("ctrl+s", || {}, "Save form");
        registry.register("Escape", || {}, "Close dialog");

        let combos: Vec<_> = registry
            .shortcuts()
            .into_iter()
            .map(|info| info.combo)
            .collect();
        assert_eq!(combos, vec!["escape", "ctrl+s", "alt+d"]);
    }
}
