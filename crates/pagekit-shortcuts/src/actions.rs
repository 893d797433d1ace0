use std::rc::Rc;

use serde::{
    Deserialize,
    Serialize,
};
use tracing::info;

use crate::models::ShortcutResult;
use crate::parser::ComboParser;
use crate::registry::{
    BareKeyCasing,
    ShortcutRegistry,
};

/// Page-specific targets of the default bindings.
///
/// Every method is a no-op when its target is missing from the page.
#[cfg_attr(test, mockall::automock)]
pub trait PageActions {
    /// Clicks the submit button of the first form, unless that form holds a
    /// search input.
    fn submit_primary_form(&self);

    fn focus_search(&self);

    /// Hides the dialog that is currently shown, if any.
    fn close_dialog(&self);

    /// Clicks the first link whose href contains `href_fragment`.
    fn follow_link(&self, href_fragment: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub combo: String,
    pub href_contains: String,
    #[serde(default)]
    pub description: String,
}

impl NavLink {
    pub fn new(combo: &str, href_contains: &str, description: &str) -> Self {
        Self {
            combo: combo.to_string(),
            href_contains: href_contains.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutSettings {
    #[serde(default)]
    pub bare_key_casing: BareKeyCasing,

    #[serde(default = "default_install_defaults")]
    pub install_defaults: bool,

    #[serde(default = "default_nav_links")]
    pub nav_links: Vec<NavLink>,
}

impl Default for ShortcutSettings {
    fn default() -> Self {
        Self {
            bare_key_casing: BareKeyCasing::default(),
            install_defaults: default_install_defaults(),
            nav_links: default_nav_links(),
        }
    }
}

fn default_install_defaults() -> bool {
    true
}

fn default_nav_links() -> Vec<NavLink> {
    vec![
        NavLink::new("alt+d", "dashboard", "Go to dashboard"),
        NavLink::new("alt+s", "stok", "Go to stock"),
        NavLink::new("alt+f", "fatura", "Go to invoices"),
        NavLink::new("alt+c", "cari", "Go to accounts"),
    ]
}

/// Wires the application's default shortcuts onto `registry`.
///
/// Navigation combos come from configuration and go through the strict
/// parser, so a malformed entry is reported instead of silently registered.
pub fn register_default_shortcuts(
    registry: &mut ShortcutRegistry, actions: Rc<dyn PageActions>, settings: &ShortcutSettings,
) -> ShortcutResult<()> {
    let parser = ComboParser::new();

    let nav_combos = settings
        .nav_links
        .iter()
        .map(|link| parser.parse(&link.combo))
        .collect::<ShortcutResult<Vec<_>>>()?;

    let target = actions.clone();
    registry.register("ctrl+s", move || target.submit_primary_form(), "Save form");

    let target = actions.clone();
    registry.register("ctrl+k", move || target.focus_search(), "Search");

    let target = actions.clone();
    registry.register("Escape", move || target.close_dialog(), "Close dialog");

    for (link, combo) in settings.nav_links.iter().zip(nav_combos) {
        let target = actions.clone();
        let fragment = link.href_contains.clone();
        registry.insert(
            combo,
            Rc::new(move || target.follow_link(&fragment)),
            &link.description,
        );
    }

    info!("Registered {} default shortcuts", registry.len());
    Ok(())
}
