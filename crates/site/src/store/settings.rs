//! Settings repository over `settings.json`.
//!
//! Unlike the list-shaped documents, settings are a single object and a
//! missing file quietly falls back to the defaults, so reads never fail
//! on a fresh data directory.

use super::{JsonStore, StoreError};
use crate::models::settings::Settings;

const FILE: &str = "settings.json";

/// Repository for the site-wide settings document.
pub struct SettingsRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Current settings, defaults when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn get(&self) -> Result<Settings, StoreError> {
        self.store.read(FILE, Settings::default).await
    }

    /// Replace the settings document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be written.
    pub async fn put(&self, settings: &Settings) -> Result<(), StoreError> {
        self.store.write(FILE, settings).await
    }

    /// Write the default settings file if none exists.
    ///
    /// Called once at startup so operators find an editable file on disk
    /// rather than having to guess the schema.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read or written.
    pub async fn ensure_exists(&self) -> Result<Settings, StoreError> {
        self.store
            .update(FILE, Settings::default, |settings: &mut Settings| {
                settings.clone()
            })
            .await
    }

    /// Flip the owner authorization switch.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read or written.
    pub async fn set_owner_authorized(&self, authorized: bool) -> Result<Settings, StoreError> {
        self.store
            .update(FILE, Settings::default, |settings: &mut Settings| {
                settings.owner_authorized = authorized;
                settings.clone()
            })
            .await
    }

    /// Flip maintenance mode.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read or written.
    pub async fn set_maintenance(&self, maintenance: bool) -> Result<Settings, StoreError> {
        self.store
            .update(FILE, Settings::default, |settings: &mut Settings| {
                settings.maintenance = maintenance;
                settings.clone()
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_on_fresh_dir_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let repo = SettingsRepository::new(&store);

        let settings = repo.get().await.unwrap();
        assert!(!settings.owner_authorized);
        assert!(!settings.maintenance);
        assert_eq!(settings.cafe_number, "+7 705 561 9337");
    }

    #[tokio::test]
    async fn test_ensure_exists_writes_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let repo = SettingsRepository::new(&store);

        assert!(!dir.path().join(FILE).exists());
        repo.ensure_exists().await.unwrap();
        assert!(dir.path().join(FILE).exists());

        repo.set_owner_authorized(true).await.unwrap();
        let settings = repo.ensure_exists().await.unwrap();
        assert!(settings.owner_authorized);
    }

    #[tokio::test]
    async fn test_toggles_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let repo = SettingsRepository::new(&store);

        repo.set_maintenance(true).await.unwrap();
        assert!(repo.get().await.unwrap().maintenance);
        repo.set_maintenance(false).await.unwrap();
        assert!(!repo.get().await.unwrap().maintenance);
    }
}
