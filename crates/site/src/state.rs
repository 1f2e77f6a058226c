//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::i18n::{TranslationError, Translations};
use crate::store::JsonStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the JSON store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    store: JsonStore,
    translations: Translations,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded translation tables fail to
    /// parse.
    pub fn new(config: SiteConfig) -> Result<Self, TranslationError> {
        let store = JsonStore::new(config.data_dir.clone());
        let translations = Translations::load()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                translations,
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the JSON document store.
    #[must_use]
    pub fn store(&self) -> &JsonStore {
        &self.inner.store
    }

    /// Get a reference to the translation tables.
    #[must_use]
    pub fn translations(&self) -> &Translations {
        &self.inner.translations
    }
}
