//! Authentication service.
//!
//! Staff accounts use username and password. Passwords are hashed with
//! Argon2id and stored as PHC strings inside `users.json`.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use jungle_park_core::{Role, UserId};

use crate::models::user::User;
use crate::store::{JsonStore, StoreError, UserRepository};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Password the auto-provisioned `root` account starts with when
/// `ROOT_PASSWORD` is not set. The account is flagged for a forced
/// change, so this value only ever works for the first login.
pub const INITIAL_ROOT_PASSWORD: &str = "root12345";

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials (wrong password or unknown username).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// Username already taken.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// New password and its confirmation differ.
    #[error("password confirmation does not match")]
    PasswordMismatch,

    /// Current password check failed during a password change.
    #[error("current password is incorrect")]
    WrongCurrentPassword,

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Authentication service.
///
/// Handles staff login, account creation, and password changes.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username or
    /// password is wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .users
            .get_by_username(username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        Ok(user)
    }

    /// Create a new staff account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the password is too short and
    /// `AuthError::UserAlreadyExists` if the username is taken.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::WeakPassword("username must not be empty".into()));
        }
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = User {
            id: UserId::generate(),
            username: username.to_string(),
            password_hash,
            role,
            must_change_password: false,
        };

        self.users.create(user).await.map_err(|e| match e {
            StoreError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Store(other),
        })
    }

    /// Change a user's own password.
    ///
    /// Clears the forced-change flag on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WrongCurrentPassword` if `current` does not
    /// verify, `AuthError::WeakPassword` if the new password is too
    /// short, and `AuthError::PasswordMismatch` if the confirmation
    /// differs.
    pub async fn change_password(
        &self,
        user_id: UserId,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), AuthError> {
        let user = self
            .users
            .get(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(current, &user.password_hash)
            .map_err(|_| AuthError::WrongCurrentPassword)?;
        validate_password(new)?;
        if new != confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let password_hash = hash_password(new)?;
        self.users
            .set_password(user_id, password_hash, false)
            .await?;

        Ok(())
    }

    /// Reset another user's password (administrator action).
    ///
    /// The account is flagged for a forced change so the owner picks
    /// their own password on the next login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the password is too short.
    pub async fn reset_password(&self, user_id: UserId, new: &str) -> Result<(), AuthError> {
        validate_password(new)?;
        let password_hash = hash_password(new)?;
        self.users.set_password(user_id, password_hash, true).await?;
        Ok(())
    }

    /// Create the `root` administrator if it does not exist yet.
    ///
    /// Returns `true` when the account was created on this call. The
    /// fresh account carries the forced-change flag regardless of where
    /// the password came from.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the user document cannot be
    /// updated.
    pub async fn ensure_root_account(
        &self,
        override_password: Option<&str>,
    ) -> Result<bool, AuthError> {
        let password = override_password.unwrap_or(INITIAL_ROOT_PASSWORD);
        let password_hash = hash_password(password)?;
        Ok(self.users.ensure_root(password_hash).await?)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use jungle_park_core::Role;

    use super::*;
    use crate::models::user::ROOT_USERNAME;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("secret123").unwrap();
        assert!(verify_password("secret123", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_password_counts_characters_not_bytes() {
        // Six Cyrillic letters are twelve bytes but still six characters.
        assert!(validate_password("пароль").is_ok());
        assert!(matches!(
            validate_password("пять5"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let auth = AuthService::new(&store);

        auth.create_user("bartender", "secret123", Role::Bartender)
            .await
            .unwrap();

        assert!(auth.login("bartender", "secret123").await.is_ok());
        assert!(matches!(
            auth.login("bartender", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("ghost", "secret123").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_trims_username() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let auth = AuthService::new(&store);

        auth.create_user("cashier", "secret123", Role::Cashier)
            .await
            .unwrap();

        assert!(auth.login("  cashier ", "secret123").await.is_ok());
    }

    #[tokio::test]
    async fn test_change_password_validations() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let auth = AuthService::new(&store);

        let user = auth
            .create_user("barista", "secret123", Role::Bartender)
            .await
            .unwrap();

        assert!(matches!(
            auth.change_password(user.id, "wrong", "newpass1", "newpass1")
                .await,
            Err(AuthError::WrongCurrentPassword)
        ));
        assert!(matches!(
            auth.change_password(user.id, "secret123", "short", "short")
                .await,
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            auth.change_password(user.id, "secret123", "newpass1", "other")
                .await,
            Err(AuthError::PasswordMismatch)
        ));

        auth.change_password(user.id, "secret123", "newpass1", "newpass1")
            .await
            .unwrap();
        assert!(auth.login("barista", "newpass1").await.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_root_account_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let auth = AuthService::new(&store);

        assert!(auth.ensure_root_account(None).await.unwrap());
        assert!(!auth.ensure_root_account(None).await.unwrap());

        let root = auth.login(ROOT_USERNAME, INITIAL_ROOT_PASSWORD).await.unwrap();
        assert_eq!(root.role, Role::Administrator);
        assert!(root.must_change_password);
    }

    #[tokio::test]
    async fn test_ensure_root_account_honors_override() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let auth = AuthService::new(&store);

        auth.ensure_root_account(Some("hunter2x")).await.unwrap();
        assert!(auth.login(ROOT_USERNAME, "hunter2x").await.is_ok());
        assert!(matches!(
            auth.login(ROOT_USERNAME, INITIAL_ROOT_PASSWORD).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_reset_password_forces_change() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let auth = AuthService::new(&store);

        let user = auth
            .create_user("waiter", "secret123", Role::Cashier)
            .await
            .unwrap();
        auth.reset_password(user.id, "fresh-pass").await.unwrap();

        let logged_in = auth.login("waiter", "fresh-pass").await.unwrap();
        assert!(logged_in.must_change_password);
    }
}
