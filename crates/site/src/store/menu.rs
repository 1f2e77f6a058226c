//! Menu repository over `menu.json`.

use jungle_park_core::MenuItemId;

use super::{JsonStore, StoreError};
use crate::models::menu_item::MenuItem;

const FILE: &str = "menu.json";

/// Repository for menu item operations.
pub struct MenuRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> MenuRepository<'a> {
    /// Create a new menu repository.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// All items, in document order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn list(&self) -> Result<Vec<MenuItem>, StoreError> {
        self.store.read(FILE, Vec::new).await
    }

    /// Items shown on the public menu.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn available(&self) -> Result<Vec<MenuItem>, StoreError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|i| i.available)
            .collect())
    }

    /// Look an item up by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn get(&self, id: MenuItemId) -> Result<Option<MenuItem>, StoreError> {
        Ok(self.list().await?.into_iter().find(|i| i.id == id))
    }

    /// Add a new item.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read or written.
    pub async fn create(&self, item: MenuItem) -> Result<MenuItem, StoreError> {
        self.store
            .update(FILE, Vec::new, |items: &mut Vec<MenuItem>| {
                items.push(item.clone());
                item
            })
            .await
    }

    /// Replace an existing item wholesale.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown ID.
    pub async fn put(&self, item: MenuItem) -> Result<(), StoreError> {
        self.store
            .try_update(FILE, Vec::new, |items: &mut Vec<MenuItem>| {
                let slot = items
                    .iter_mut()
                    .find(|i| i.id == item.id)
                    .ok_or(StoreError::NotFound)?;
                *slot = item;
                Ok(())
            })
            .await
    }

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown ID.
    pub async fn delete(&self, id: MenuItemId) -> Result<(), StoreError> {
        self.store
            .try_update(FILE, Vec::new, |items: &mut Vec<MenuItem>| {
                if !items.iter().any(|i| i.id == id) {
                    return Err(StoreError::NotFound);
                }
                items.retain(|i| i.id != id);
                Ok(())
            })
            .await
    }
}
