//! Site languages and per-language text values.

use serde::{Deserialize, Serialize};

/// Languages the site is served in.
///
/// Russian is the default and the fallback for every localized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ru,
    Kk,
}

impl Lang {
    /// Two-letter code used in URLs, session state and translation files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::Kk => "kk",
        }
    }

    /// Native-script label for the language switcher.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ru => "Рус",
            Self::Kk => "Қаз",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ru" => Ok(Self::Ru),
            "kk" => Ok(Self::Kk),
            _ => Err(format!("unsupported language: {s}")),
        }
    }
}

/// A text value carrying one string per supported language.
///
/// Stored in the JSON documents as `{"ru": "...", "kk": "..."}`. Lookup
/// falls back to Russian when the requested language's string is missing
/// or empty, so partially translated records still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LocalizedText {
    #[serde(default)]
    pub ru: String,
    #[serde(default)]
    pub kk: String,
}

impl LocalizedText {
    /// Build a value from both translations.
    #[must_use]
    pub fn new(ru: impl Into<String>, kk: impl Into<String>) -> Self {
        Self {
            ru: ru.into(),
            kk: kk.into(),
        }
    }

    /// Resolve the text for `lang`, falling back to Russian.
    #[must_use]
    pub fn get(&self, lang: Lang) -> &str {
        let text = match lang {
            Lang::Ru => &self.ru,
            Lang::Kk => &self.kk,
        };
        if text.is_empty() { &self.ru } else { text }
    }

    /// True when neither translation carries any text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ru.is_empty() && self.kk.is_empty()
    }
}
