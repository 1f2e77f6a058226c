//! Program repository over `programs.json`.

use jungle_park_core::ProgramId;

use super::{JsonStore, StoreError};
use crate::models::program::Program;

const FILE: &str = "programs.json";

/// Repository for holiday program operations.
pub struct ProgramRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> ProgramRepository<'a> {
    /// Create a new program repository.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// All programs, in document order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn list(&self) -> Result<Vec<Program>, StoreError> {
        self.store.read(FILE, Vec::new).await
    }

    /// Programs open for booking.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn available(&self) -> Result<Vec<Program>, StoreError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|p| p.available)
            .collect())
    }

    /// Look a program up by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn get(&self, id: ProgramId) -> Result<Option<Program>, StoreError> {
        Ok(self.list().await?.into_iter().find(|p| p.id == id))
    }

    /// Add a new program.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read or written.
    pub async fn create(&self, program: Program) -> Result<Program, StoreError> {
        self.store
            .update(FILE, Vec::new, |programs: &mut Vec<Program>| {
                programs.push(program.clone());
                program
            })
            .await
    }

    /// Replace an existing program wholesale.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown ID.
    pub async fn put(&self, program: Program) -> Result<(), StoreError> {
        self.store
            .try_update(FILE, Vec::new, |programs: &mut Vec<Program>| {
                let slot = programs
                    .iter_mut()
                    .find(|p| p.id == program.id)
                    .ok_or(StoreError::NotFound)?;
                *slot = program;
                Ok(())
            })
            .await
    }

    /// Delete a program.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown ID.
    pub async fn delete(&self, id: ProgramId) -> Result<(), StoreError> {
        self.store
            .try_update(FILE, Vec::new, |programs: &mut Vec<Program>| {
                if !programs.iter().any(|p| p.id == id) {
                    return Err(StoreError::NotFound);
                }
                programs.retain(|p| p.id != id);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use jungle_park_core::{LocalizedText, Tenge};

    use super::*;

    fn pirates() -> Program {
        Program {
            id: ProgramId::generate(),
            title: LocalizedText::new("Пираты", "Қарақшылар"),
            description: LocalizedText::default(),
            price: Tenge::new(15000),
            available: true,
            costumes: vec!["Капитан".to_string(), "Юнга".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_get_roundtrip_keeps_costumes() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let repo = ProgramRepository::new(&store);

        let program = repo.create(pirates()).await.unwrap();
        let loaded = repo.get(program.id).await.unwrap().unwrap();
        assert_eq!(loaded.costumes, vec!["Капитан", "Юнга"]);
    }

    #[tokio::test]
    async fn test_available_filters_closed_programs() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let repo = ProgramRepository::new(&store);

        let mut closed = pirates();
        closed.available = false;
        repo.create(closed).await.unwrap();
        repo.create(pirates()).await.unwrap();

        assert_eq!(repo.available().await.unwrap().len(), 1);
    }
}
