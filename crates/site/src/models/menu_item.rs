//! Menu items.

use serde::{Deserialize, Serialize};

use jungle_park_core::{LocalizedText, MenuItemId, Tenge};

/// A dish or drink on the café menu, as stored in `menu.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub title: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    pub price: Tenge,
    /// Hidden from the public menu when false. Older documents may omit
    /// the field; those items count as available.
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_available_means_available() {
        let json = format!(
            r#"{{"id": "{}", "title": {{"ru": "Латте"}}, "price": 1200}}"#,
            MenuItemId::generate()
        );
        let item: MenuItem = serde_json::from_str(&json).unwrap();
        assert!(item.available);
        assert_eq!(item.price, Tenge::new(1200));
    }
}
