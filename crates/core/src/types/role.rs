//! Staff roles for the admin panel.

use serde::{Deserialize, Serialize};

/// Admin panel role with different permission levels.
///
/// Stored in `users.json` as the variant name. Administrators pass every
/// role gate; the other two roles only see their own section of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full access to every admin screen including user management.
    Administrator,
    /// Manages the menu.
    Bartender,
    /// Manages holiday programs and booking requests.
    Cashier,
}

impl Role {
    /// All assignable roles, in display order.
    pub const ALL: [Self; 3] = [Self::Administrator, Self::Bartender, Self::Cashier];

    /// Whether this role passes a gate that requires `required`.
    ///
    /// Administrators pass every gate.
    #[must_use]
    pub fn permits(self, required: Self) -> bool {
        self == Self::Administrator || self == required
    }

    /// Russian label shown in the admin panel.
    #[must_use]
    pub const fn label_ru(self) -> &'static str {
        match self {
            Self::Administrator => "Администратор",
            Self::Bartender => "Бармен",
            Self::Cashier => "Кассир",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Administrator => write!(f, "Administrator"),
            Self::Bartender => write!(f, "Bartender"),
            Self::Cashier => write!(f, "Cashier"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Administrator" => Ok(Self::Administrator),
            "Bartender" => Ok(Self::Bartender),
            "Cashier" => Ok(Self::Cashier),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
