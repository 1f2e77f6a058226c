//! Flat-file JSON persistence.
//!
//! Every collection is one pretty-printed JSON document under the data
//! directory:
//!
//! - `users.json` - Admin accounts
//! - `menu.json` - Menu items
//! - `programs.json` - Holiday programs
//! - `banners.json` - Home page banners
//! - `settings.json` - The settings singleton
//! - `notifications.json` - Append-only notification log
//!
//! Writers read the whole document, mutate it in memory and write it back.
//! A single async mutex serializes those read-modify-write cycles within
//! the process so same-process writers cannot lose updates; cross-process
//! coordination is out of scope.

pub mod banners;
pub mod menu;
pub mod notifications;
pub mod programs;
pub mod settings;
pub mod users;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Mutex;

pub use banners::BannerRepository;
pub use menu::MenuRepository;
pub use notifications::NotificationLog;
pub use programs::ProgramRepository;
pub use settings::SettingsRepository;
pub use users::UserRepository;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error while reading or writing a document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A document exists but does not parse as the expected shape.
    #[error("data corruption in {file}: {message}")]
    DataCorruption { file: String, message: String },

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g. duplicate username, protected root).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Handle to the JSON document directory.
///
/// Cheap to share by reference; the repositories in this module borrow it
/// per request the same way a connection pool would be borrowed.
#[derive(Debug)]
pub struct JsonStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Create a store over `data_dir`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Directory the documents live in.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read a whole document, producing `default()` when the file does not
    /// exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` on filesystem failure and
    /// `StoreError::DataCorruption` when the document does not parse.
    pub async fn read<T>(
        &self,
        file: &str,
        default: impl FnOnce() -> T,
    ) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let _guard = self.write_lock.lock().await;
        self.read_unlocked(file, default).await
    }

    /// Overwrite a whole document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` on filesystem failure.
    pub async fn write<T>(&self, file: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let _guard = self.write_lock.lock().await;
        self.write_unlocked(file, value).await
    }

    /// Read-modify-write a document under the store lock.
    ///
    /// `mutate` runs on the freshly read value; the document is written
    /// back wholesale afterwards, and `mutate`'s return value is passed
    /// through.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` on filesystem failure and
    /// `StoreError::DataCorruption` when the document does not parse.
    pub async fn update<T, R>(
        &self,
        file: &str,
        default: impl FnOnce() -> T,
        mutate: impl FnOnce(&mut T) -> R,
    ) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        let _guard = self.write_lock.lock().await;
        let mut value = self.read_unlocked(file, default).await?;
        let result = mutate(&mut value);
        self.write_unlocked(file, &value).await?;
        Ok(result)
    }

    /// Like [`Self::update`], but `mutate` may reject the change.
    ///
    /// When `mutate` returns an error the document is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates `mutate`'s error, plus `StoreError::Io` /
    /// `StoreError::DataCorruption` from the surrounding read and write.
    pub async fn try_update<T, R>(
        &self,
        file: &str,
        default: impl FnOnce() -> T,
        mutate: impl FnOnce(&mut T) -> Result<R, StoreError>,
    ) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        let _guard = self.write_lock.lock().await;
        let mut value = self.read_unlocked(file, default).await?;
        let result = mutate(&mut value)?;
        self.write_unlocked(file, &value).await?;
        Ok(result)
    }

    async fn read_unlocked<T>(
        &self,
        file: &str,
        default: impl FnOnce() -> T,
    ) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = self.data_dir.join(file);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(default()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::DataCorruption {
            file: file.to_string(),
            message: e.to_string(),
        })
    }

    async fn write_unlocked<T>(&self, file: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        let mut body =
            serde_json::to_string_pretty(value).map_err(|e| StoreError::DataCorruption {
                file: file.to_string(),
                message: e.to_string(),
            })?;
        body.push('\n');
        tokio::fs::write(self.data_dir.join(file), body).await?;
        Ok(())
    }
}
