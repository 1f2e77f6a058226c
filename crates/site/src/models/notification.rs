//! Notification log entries.
//!
//! The log stands in for an outbound WhatsApp queue: entries are appended
//! and never dispatched, edited or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which flow produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Cart checkout from the menu page.
    Order,
    /// Program booking or seasonal banner signup.
    Program,
}

/// One queued outbound message, as appended to `notifications.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: NotificationKind,
    /// WhatsApp number the message is addressed to.
    pub recipient: String,
    /// Rendered multi-line message text.
    pub message: String,
    /// The request payload the message was rendered from.
    pub payload: serde_json::Value,
}

impl NotificationEntry {
    /// Build an entry stamped with the current time.
    #[must_use]
    pub fn new(
        kind: NotificationKind,
        recipient: impl Into<String>,
        message: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            recipient: recipient.into(),
            message: message.into(),
            payload,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::Order).unwrap(),
            "\"order\""
        );
        assert_eq!(
            serde_json::to_string(&NotificationKind::Program).unwrap(),
            "\"program\""
        );
    }

    #[test]
    fn test_entry_roundtrip() {
        let entry = NotificationEntry::new(
            NotificationKind::Order,
            "+7 705 561 9337",
            "📦 Новый заказ",
            serde_json::json!({"items": ["Латте"]}),
        );
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: NotificationEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind, NotificationKind::Order);
        assert_eq!(parsed.recipient, entry.recipient);
        assert_eq!(parsed.message, entry.message);
    }
}
