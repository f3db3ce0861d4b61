use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Packed `0xAARRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argb(pub u32);

impl Argb {
    pub const WHITE: Argb = Argb(0xFFFF_FFFF);
    pub const RED: Argb = Argb(0xFFFF_0000);

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Named chat formatting colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatColor {
    White,
    Gray,
    DarkGray,
    Yellow,
    Gold,
    Red,
    DarkRed,
    Blue,
    Green,
}

impl ChatColor {
    pub fn argb(self) -> Argb {
        match self {
            Self::White => Argb(0xFFFF_FFFF),
            Self::Gray => Argb(0xFFAA_AAAA),
            Self::DarkGray => Argb(0xFF55_5555),
            Self::Yellow => Argb(0xFFFF_FF55),
            Self::Gold => Argb(0xFFFF_AA00),
            Self::Red => Argb(0xFFFF_5555),
            Self::DarkRed => Argb(0xFFAA_0000),
            Self::Blue => Argb(0xFF55_55FF),
            Self::Green => Argb(0xFF55_FF55),
        }
    }
}

/// What a line of text says.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextContent {
    Literal(String),
    /// Looked up in [`Translations`] at display time.
    Translatable(String),
}

/// One styled line of text, e.g. a tooltip row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextLine {
    pub content: TextContent,
    pub color: Option<ChatColor>,
}

impl TextLine {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            content: TextContent::Literal(text.into()),
            color: None,
        }
    }

    pub fn translatable(key: impl Into<String>) -> Self {
        Self {
            content: TextContent::Translatable(key.into()),
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: ChatColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Translation key, if this line is translatable.
    pub fn key(&self) -> Option<&str> {
        match &self.content {
            TextContent::Translatable(key) => Some(key),
            TextContent::Literal(_) => None,
        }
    }

    /// Resolve to display text. Missing translations show the key.
    pub fn resolve(&self, translations: &Translations) -> String {
        match &self.content {
            TextContent::Literal(text) => text.clone(),
            TextContent::Translatable(key) => translations.get(key).unwrap_or(key).to_string(),
        }
    }
}

/// Errors loading a translation table.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Translation table: key → display string for one language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat JSON object of `"key": "text"` pairs.
    pub fn from_json_str(json: &str) -> Result<Self, TranslationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
