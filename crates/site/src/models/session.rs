//! Session-related types.
//!
//! Types stored in the session: the logged-in staff identity, the
//! visitor's cart and language choice.

use serde::{Deserialize, Serialize};

use jungle_park_core::{Role, UserId};

use crate::models::user::User;

/// Session-stored staff identity.
///
/// Minimal data stored in the session to identify the logged-in user.
/// `must_change_password` is mirrored here so the forced-redirect check
/// does not hit the store on every admin request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub must_change_password: bool,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            must_change_password: user.must_change_password,
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in staff user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the visitor's shopping cart.
    pub const CART: &str = "cart";

    /// Key for the visitor's language choice.
    pub const LANG: &str = "lang";
}
