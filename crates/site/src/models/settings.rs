//! The settings singleton.

use serde::{Deserialize, Serialize};

/// Site-wide settings, stored as the single object in `settings.json`.
///
/// Seeded with these defaults the first time the file is read; individual
/// missing keys also fall back to them, so hand-edited documents keep
/// working.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Hard gate for all customer-facing submissions. While false, orders
    /// and booking requests are rejected and nothing reaches the
    /// notification log.
    pub owner_authorized: bool,
    /// WhatsApp number orders are addressed to.
    pub cafe_number: String,
    /// WhatsApp number program bookings are addressed to.
    pub cashier_number: String,
    /// Diverts all non-admin traffic to the maintenance page.
    pub maintenance: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owner_authorized: false,
            cafe_number: "+7 705 561 9337".to_string(),
            cashier_number: "+7 705 123 4567".to_string(),
            maintenance: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.owner_authorized);
        assert!(!settings.maintenance);
        assert_eq!(settings.cafe_number, "+7 705 561 9337");
        assert_eq!(settings.cashier_number, "+7 705 123 4567");
    }

    #[test]
    fn test_serde_uses_camel_case_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json.get("ownerAuthorized").is_some());
        assert!(json.get("cafeNumber").is_some());
        assert!(json.get("cashierNumber").is_some());
        assert!(json.get("maintenance").is_some());
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"ownerAuthorized": true}"#).unwrap();
        assert!(settings.owner_authorized);
        assert_eq!(settings.cafe_number, "+7 705 561 9337");
    }
}
