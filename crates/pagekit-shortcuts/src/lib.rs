pub mod actions;
pub mod models;
pub mod parser;
pub mod registry;

pub use actions::{
    NavLink,
    PageActions,
    ShortcutSettings,
    register_default_shortcuts,
};
pub use models::{
    Combo,
    FocusedElement,
    KeyEvent,
    Modifier,
    ShortcutError,
    ShortcutInfo,
    ShortcutResult,
};
pub use parser::ComboParser;
pub use registry::{
    BareKeyCasing,
    Dispatch,
    FocusProbe,
    ShortcutEntry,
    ShortcutHandler,
    ShortcutRegistry,
};

pub fn create_registry(settings: &ShortcutSettings) -> ShortcutRegistry {
    ShortcutRegistry::with_bare_key_casing(settings.bare_key_casing)
}
