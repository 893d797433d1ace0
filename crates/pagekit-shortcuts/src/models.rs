use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    None,
    Ctrl,
    Alt,
}

impl Modifier {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Ctrl => "ctrl+",
            Self::Alt => "alt+",
        }
    }
}

/// Lookup key of the registry: one modifier class plus a key name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Combo {
    pub modifier: Modifier,
    pub key: String,
}

impl Combo {
    pub fn new(modifier: Modifier, key: impl Into<String>) -> Self {
        Self {
            modifier,
            key: key.into(),
        }
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        Self::new(Modifier::Ctrl, key)
    }

    pub fn alt(key: impl Into<String>) -> Self {
        Self::new(Modifier::Alt, key)
    }

    pub fn bare(key: impl Into<String>) -> Self {
        Self::new(Modifier::None, key)
    }

    pub fn is_bare(&self) -> bool {
        self.modifier == Modifier::None
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.modifier.prefix(), self.key)
    }
}

/// The parts of a DOM `keydown` event the dispatcher reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// The combo classes this event belongs to, ctrl before alt. Ctrl and
    /// alt are independent, so a ctrl+alt keydown (AltGr on Windows) belongs
    /// to both. The unmodified class requires no modifier at all, shift
    /// included.
    pub fn modifiers(&self) -> Vec<Modifier> {
        let mut modifiers = Vec::with_capacity(2);
        if self.ctrl || self.meta {
            modifiers.push(Modifier::Ctrl);
        }
        if self.alt {
            modifiers.push(Modifier::Alt);
        }
        if modifiers.is_empty() && !self.shift {
            modifiers.push(Modifier::None);
        }
        modifiers
    }
}

/// Snapshot of `document.activeElement`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusedElement {
    pub tag_name: String,
    pub content_editable: bool,
}

impl FocusedElement {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            content_editable: false,
        }
    }

    pub fn editable(mut self) -> Self {
        self.content_editable = true;
        self
    }

    pub fn is_text_input(&self) -> bool {
        self.tag_name.eq_ignore_ascii_case("input")
            || self.tag_name.eq_ignore_ascii_case("textarea")
            || self.content_editable
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutInfo {
    pub combo: String,
    pub description: String,
}

pub type ShortcutResult<T> = Result<T, ShortcutError>;

#[derive(Debug, thiserror::Error)]
pub enum ShortcutError {
    #[error("Invalid shortcut key: {0}")]
    InvalidShortcut(String),

    #[error("Unknown modifier '{modifier}' in shortcut: {shortcut}")]
    UnknownModifier { modifier: String, shortcut: String },
}
