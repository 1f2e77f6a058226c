//! Admin panel user accounts.

use serde::{Deserialize, Serialize};

use jungle_park_core::{Role, UserId};

/// Username of the auto-provisioned administrator.
///
/// The root account is created at bootstrap with a forced password change
/// and can never be deleted; its role is pinned to Administrator.
pub const ROOT_USERNAME: &str = "root";

/// An admin panel account, as stored in `users.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Argon2 hash in PHC string format.
    pub password_hash: String,
    pub role: Role,
    /// Forces a redirect to the password-change screen until cleared.
    #[serde(default)]
    pub must_change_password: bool,
}

impl User {
    /// Whether this is the protected root account.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.username == ROOT_USERNAME
    }
}
