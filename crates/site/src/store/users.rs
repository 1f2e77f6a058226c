//! User repository over `users.json`.

use jungle_park_core::{Role, UserId};

use super::{JsonStore, StoreError};
use crate::models::user::{ROOT_USERNAME, User};

const FILE: &str = "users.json";

/// Repository for admin account operations.
pub struct UserRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// All accounts, in document order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn list(&self) -> Result<Vec<User>, StoreError> {
        self.store.read(FILE, Vec::new).await
    }

    /// Look an account up by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.list().await?.into_iter().find(|u| u.id == id))
    }

    /// Look an account up by username.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|u| u.username == username))
    }

    /// Add a new account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the username is already taken.
    pub async fn create(&self, user: User) -> Result<User, StoreError> {
        self.store
            .try_update(FILE, Vec::new, |users: &mut Vec<User>| {
                if users.iter().any(|u| u.username == user.username) {
                    return Err(StoreError::Conflict(format!(
                        "username already exists: {}",
                        user.username
                    )));
                }
                users.push(user.clone());
                Ok(user)
            })
            .await
    }

    /// Change an account's role.
    ///
    /// The root account's role is pinned to Administrator.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown ID and
    /// `StoreError::Conflict` for the protected root account.
    pub async fn set_role(&self, id: UserId, role: Role) -> Result<(), StoreError> {
        self.store
            .try_update(FILE, Vec::new, |users: &mut Vec<User>| {
                let user = users
                    .iter_mut()
                    .find(|u| u.id == id)
                    .ok_or(StoreError::NotFound)?;
                if user.is_root() {
                    return Err(StoreError::Conflict(
                        "the root account's role is fixed".to_string(),
                    ));
                }
                user.role = role;
                Ok(())
            })
            .await
    }

    /// Replace an account's password hash.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown ID.
    pub async fn set_password(
        &self,
        id: UserId,
        password_hash: String,
        must_change_password: bool,
    ) -> Result<(), StoreError> {
        self.store
            .try_update(FILE, Vec::new, |users: &mut Vec<User>| {
                let user = users
                    .iter_mut()
                    .find(|u| u.id == id)
                    .ok_or(StoreError::NotFound)?;
                user.password_hash = password_hash;
                user.must_change_password = must_change_password;
                Ok(())
            })
            .await
    }

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown ID and
    /// `StoreError::Conflict` for the protected root account.
    pub async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        self.store
            .try_update(FILE, Vec::new, |users: &mut Vec<User>| {
                let user = users
                    .iter()
                    .find(|u| u.id == id)
                    .ok_or(StoreError::NotFound)?;
                if user.is_root() {
                    return Err(StoreError::Conflict(
                        "the root account cannot be deleted".to_string(),
                    ));
                }
                users.retain(|u| u.id != id);
                Ok(())
            })
            .await
    }

    /// Provision the root account if it does not exist yet.
    ///
    /// Returns `true` when the account was created by this call.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read or written.
    pub async fn ensure_root(&self, password_hash: String) -> Result<bool, StoreError> {
        self.store
            .update(FILE, Vec::new, |users: &mut Vec<User>| {
                if users.iter().any(User::is_root) {
                    return false;
                }
                users.push(User {
                    id: UserId::generate(),
                    username: ROOT_USERNAME.to_string(),
                    password_hash,
                    role: Role::Administrator,
                    must_change_password: true,
                });
                true
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn staff(username: &str, role: Role) -> User {
        User {
            id: UserId::generate(),
            username: username.to_string(),
            password_hash: "hash".to_string(),
            role,
            must_change_password: false,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_username() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let repo = UserRepository::new(&store);

        repo.create(staff("dana", Role::Cashier)).await.unwrap();
        let result = repo.create(staff("dana", Role::Bartender)).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_protects_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let repo = UserRepository::new(&store);

        repo.ensure_root("hash".to_string()).await.unwrap();
        let root = repo.get_by_username(ROOT_USERNAME).await.unwrap().unwrap();

        let result = repo.delete(root.id).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert!(repo.get(root.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_ensure_root_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let repo = UserRepository::new(&store);

        assert!(repo.ensure_root("hash".to_string()).await.unwrap());
        assert!(!repo.ensure_root("other".to_string()).await.unwrap());

        let root = repo.get_by_username(ROOT_USERNAME).await.unwrap().unwrap();
        assert_eq!(root.password_hash, "hash");
        assert!(root.must_change_password);
        assert_eq!(root.role, Role::Administrator);
    }

    #[tokio::test]
    async fn test_set_password_clears_flag() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let repo = UserRepository::new(&store);

        repo.ensure_root("hash".to_string()).await.unwrap();
        let root = repo.get_by_username(ROOT_USERNAME).await.unwrap().unwrap();

        repo.set_password(root.id, "new-hash".to_string(), false)
            .await
            .unwrap();
        let root = repo.get(root.id).await.unwrap().unwrap();
        assert_eq!(root.password_hash, "new-hash");
        assert!(!root.must_change_password);
    }

    #[tokio::test]
    async fn test_set_role_pins_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let repo = UserRepository::new(&store);

        repo.ensure_root("hash".to_string()).await.unwrap();
        let root = repo.get_by_username(ROOT_USERNAME).await.unwrap().unwrap();
        let dana = repo.create(staff("dana", Role::Cashier)).await.unwrap();

        assert!(matches!(
            repo.set_role(root.id, Role::Bartender).await,
            Err(StoreError::Conflict(_))
        ));

        repo.set_role(dana.id, Role::Bartender).await.unwrap();
        let dana = repo.get(dana.id).await.unwrap().unwrap();
        assert_eq!(dana.role, Role::Bartender);
    }
}
