//! Interface translations for the public site.
//!
//! The locale tables ship inside the binary (`translations/*.json`) and
//! are parsed once at startup. Lookup falls back from Kazakh to Russian
//! and finally to the key itself, so a missing entry shows up in the UI
//! instead of crashing a render.

use std::collections::HashMap;
use std::sync::Arc;

use jungle_park_core::Lang;

static RU_TABLE: &str = include_str!("../translations/ru.json");
static KK_TABLE: &str = include_str!("../translations/kk.json");

/// Translation loading errors.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        source: serde_json::Error,
    },
}

/// Immutable lookup tables for every supported locale.
#[derive(Debug, Clone)]
pub struct Translations {
    ru: Arc<HashMap<String, String>>,
    kk: Arc<HashMap<String, String>>,
}

impl Translations {
    /// Parse the embedded locale tables.
    ///
    /// # Errors
    ///
    /// Returns `TranslationError` if an embedded table is not valid JSON.
    pub fn load() -> Result<Self, TranslationError> {
        Ok(Self {
            ru: Arc::new(parse_table(RU_TABLE, "translations/ru.json")?),
            kk: Arc::new(parse_table(KK_TABLE, "translations/kk.json")?),
        })
    }

    /// Translate `key` into `lang`.
    ///
    /// Kazakh falls back to Russian for keys that have not been
    /// translated yet. Unknown keys come back verbatim.
    #[must_use]
    pub fn t<'a>(&'a self, lang: Lang, key: &'a str) -> &'a str {
        let table = match lang {
            Lang::Ru => &self.ru,
            Lang::Kk => &self.kk,
        };
        table
            .get(key)
            .or_else(|| self.ru.get(key))
            .map_or(key, String::as_str)
    }
}

fn parse_table(
    raw: &str,
    file: &'static str,
) -> Result<HashMap<String, String>, TranslationError> {
    serde_json::from_str(raw).map_err(|source| TranslationError::Parse { file, source })
}
