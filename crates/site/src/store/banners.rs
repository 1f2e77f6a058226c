//! Banner repository over `banners.json`.

use jungle_park_core::BannerId;

use super::{JsonStore, StoreError};
use crate::models::banner::Banner;

const FILE: &str = "banners.json";

/// Repository for home page banner operations.
pub struct BannerRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> BannerRepository<'a> {
    /// Create a new banner repository.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// All banners, in document order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn list(&self) -> Result<Vec<Banner>, StoreError> {
        self.store.read(FILE, Vec::new).await
    }

    /// Banners shown on the home page.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn active(&self) -> Result<Vec<Banner>, StoreError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|b| b.active)
            .collect())
    }

    /// Look a banner up by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn get(&self, id: BannerId) -> Result<Option<Banner>, StoreError> {
        Ok(self.list().await?.into_iter().find(|b| b.id == id))
    }

    /// Add a new banner.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read or written.
    pub async fn create(&self, banner: Banner) -> Result<Banner, StoreError> {
        self.store
            .update(FILE, Vec::new, |banners: &mut Vec<Banner>| {
                banners.push(banner.clone());
                banner
            })
            .await
    }

    /// Replace an existing banner wholesale.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown ID.
    pub async fn put(&self, banner: Banner) -> Result<(), StoreError> {
        self.store
            .try_update(FILE, Vec::new, |banners: &mut Vec<Banner>| {
                let slot = banners
                    .iter_mut()
                    .find(|b| b.id == banner.id)
                    .ok_or(StoreError::NotFound)?;
                *slot = banner;
                Ok(())
            })
            .await
    }

    /// Delete a banner.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown ID.
    pub async fn delete(&self, id: BannerId) -> Result<(), StoreError> {
        self.store
            .try_update(FILE, Vec::new, |banners: &mut Vec<Banner>| {
                if !banners.iter().any(|b| b.id == id) {
                    return Err(StoreError::NotFound);
                }
                banners.retain(|b| b.id != id);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use jungle_park_core::{LocalizedText, ProgramId};

    use super::*;
    use crate::models::banner::BannerKind;

    fn seasonal() -> Banner {
        Banner {
            id: BannerId::generate(),
            kind: BannerKind::Seasonal {
                program_id: ProgramId::generate(),
                cta: LocalizedText::new("Записаться", "Тіркелу"),
            },
            title: LocalizedText::new("Новый год", "Жаңа жыл"),
            description: LocalizedText::default(),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_active_filters_disabled_banners() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let repo = BannerRepository::new(&store);

        let mut off = seasonal();
        off.active = false;
        repo.create(off).await.unwrap();
        let on = repo.create(seasonal()).await.unwrap();

        let active = repo.active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, on.id);
    }

    #[tokio::test]
    async fn test_roundtrip_keeps_kind() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let repo = BannerRepository::new(&store);

        let banner = repo.create(seasonal()).await.unwrap();
        let loaded = repo.get(banner.id).await.unwrap().unwrap();
        assert!(loaded.is_seasonal());
        assert_eq!(loaded.program_id(), banner.program_id());
    }
}
