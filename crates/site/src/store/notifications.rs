//! Append-only notification log over `notifications.json`.
//!
//! Every outbound message the site would send over WhatsApp lands here
//! instead. Entries are never edited or deleted, so the file doubles as
//! an audit trail for orders and program requests.

use super::{JsonStore, StoreError};
use crate::models::notification::NotificationEntry;

const FILE: &str = "notifications.json";

/// Append-only log of outbound notifications.
pub struct NotificationLog<'a> {
    store: &'a JsonStore,
}

impl<'a> NotificationLog<'a> {
    /// Create a new notification log handle.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Append an entry to the end of the log.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read or written.
    pub async fn append(&self, entry: NotificationEntry) -> Result<(), StoreError> {
        self.store
            .update(FILE, Vec::new, |entries: &mut Vec<NotificationEntry>| {
                entries.push(entry);
            })
            .await
    }

    /// All entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn list(&self) -> Result<Vec<NotificationEntry>, StoreError> {
        self.store.read(FILE, Vec::new).await
    }

    /// The most recent `limit` entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document cannot be read.
    pub async fn recent(&self, limit: usize) -> Result<Vec<NotificationEntry>, StoreError> {
        let mut entries = self.list().await?;
        entries.reverse();
        entries.truncate(limit);
        Ok(entries)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::notification::NotificationKind;

    fn entry(message: &str) -> NotificationEntry {
        NotificationEntry::new(
            NotificationKind::Order,
            "+7 705 561 9337",
            message,
            serde_json::json!({}),
        )
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let log = NotificationLog::new(&store);

        log.append(entry("first")).await.unwrap();
        log.append(entry("second")).await.unwrap();

        let entries = log.list().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].message, "second");
    }

    #[tokio::test]
    async fn test_recent_returns_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let log = NotificationLog::new(&store);

        for n in 0..5 {
            log.append(entry(&format!("msg {n}"))).await.unwrap();
        }

        let recent = log.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "msg 4");
        assert_eq!(recent[1].message, "msg 3");
    }
}
