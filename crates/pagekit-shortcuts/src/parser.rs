use std::collections::HashMap;

use crate::models::{
    Combo,
    Modifier,
    ShortcutError,
    ShortcutResult,
};

/// Parses combo strings into [`Combo`] values.
///
/// [`ComboParser::from_registration`] is the lenient path used by
/// `ShortcutRegistry::register`: it never fails and keeps whatever it does not
/// understand as a bare key. [`ComboParser::parse`] is the strict path used for
/// combos that come from configuration.
pub struct ComboParser {
    modifier_aliases: HashMap<&'static str, Modifier>,
}

impl Default for ComboParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ComboParser {
    pub fn new() -> Self {
        let mut modifier_aliases = HashMap::new();

        for (alias, modifier) in [
            ("ctrl", Modifier::Ctrl),
            ("control", Modifier::Ctrl),
            ("cmd", Modifier::Ctrl),
            ("meta", Modifier::Ctrl),
            ("alt", Modifier::Alt),
            ("option", Modifier::Alt),
        ] {
            modifier_aliases.insert(alias, modifier);
        }

        Self { modifier_aliases }
    }

    pub fn from_registration(combo: &str) -> Combo {
        let normalized = combo.to_lowercase();

        for modifier in [Modifier::Ctrl, Modifier::Alt] {
            if let Some(key) = normalized.strip_prefix(modifier.prefix())
                && !key.is_empty()
            {
                return Combo::new(modifier, key);
            }
        }

        Combo::bare(normalized)
    }

    pub fn parse(&self, combo: &str) -> ShortcutResult<Combo> {
        let trimmed = combo.trim();
        if trimmed.is_empty() {
            return Err(ShortcutError::InvalidShortcut(
                "Empty shortcut string".to_string(),
            ));
        }

        // A lone "+" is the plus key itself, not a separator.
        if trimmed == "+" {
            return Ok(Combo::bare("+"));
        }

        let Some((head, key)) = trimmed.split_once('+') else {
            return Ok(Combo::bare(trimmed.to_lowercase()));
        };

        let head = head.trim().to_lowercase();
        let modifier = *self.modifier_aliases.get(head.as_str()).ok_or_else(|| {
            ShortcutError::UnknownModifier {
                modifier: head.clone(),
                shortcut: combo.to_string(),
            }
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(ShortcutError::InvalidShortcut(format!(
                "No key specified: {}",
                combo
            )));
        }

        if key.len() > 1 && key.contains('+') {
            return Err(ShortcutError::InvalidShortcut(format!(
                "Only one modifier is supported: {}",
                combo
            )));
        }

        Ok(Combo::new(modifier, key.to_lowercase()))
    }

    pub fn normalize_shortcut(&self, combo: &str) -> ShortcutResult<String> {
        Ok(self.parse(combo)?.to_string())
    }

    pub fn validate_shortcut(&self, combo: &str) -> bool {
        self.parse(combo).is_ok()
    }
}
