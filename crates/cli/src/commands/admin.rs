//! Staff account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a staff account
//! jp admin create -u dana -p secret123 -r Bartender
//!
//! # Reset a password; the account must change it on next login
//! jp admin set-password -u dana -p newpass123
//! ```
//!
//! Accounts live in `users.json` under `DATA_DIR`, shared with the
//! running site.

use thiserror::Error;

use jungle_park_core::Role;
use jungle_park_site::config::ConfigError;
use jungle_park_site::services::auth::{AuthError, AuthService};
use jungle_park_site::store::UserRepository;

use super::open_store;

/// Errors that can occur during staff account operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Account operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: Administrator, Bartender, Cashier")]
    InvalidRole(String),

    /// No account with the given username.
    #[error("No staff account named: {0}")]
    UserNotFound(String),
}

/// Create a new staff account.
///
/// # Errors
///
/// Returns `AdminError::InvalidRole` for an unknown role name and
/// `AdminError::Auth` when the username is taken or the password is too
/// short.
pub async fn create_user(username: &str, password: &str, role: &str) -> Result<(), AdminError> {
    dotenvy::dotenv().ok();

    // Parse and validate role
    let role: Role = role
        .parse()
        .map_err(|_| AdminError::InvalidRole(role.to_owned()))?;

    let store = open_store()?;

    tracing::info!("Creating staff account: {} ({})", username, role);

    let user = AuthService::new(&store)
        .create_user(username, password, role)
        .await?;

    tracing::info!(
        "Staff account created successfully! ID: {}, Username: {}, Role: {}",
        user.id,
        user.username,
        user.role
    );

    Ok(())
}

/// Reset a staff password.
///
/// The account is flagged to change the password on its next login, the
/// same as the auto-provisioned `root` account.
///
/// # Errors
///
/// Returns `AdminError::UserNotFound` for an unknown username and
/// `AdminError::Auth` when the password is too short.
pub async fn set_password(username: &str, password: &str) -> Result<(), AdminError> {
    dotenvy::dotenv().ok();

    let store = open_store()?;

    let user = UserRepository::new(&store)
        .get_by_username(username)
        .await
        .map_err(AuthError::from)?
        .ok_or_else(|| AdminError::UserNotFound(username.to_owned()))?;

    AuthService::new(&store)
        .reset_password(user.id, password)
        .await?;

    tracing::info!(
        "Password reset for {}; a change is required on next login",
        user.username
    );

    Ok(())
}
