//! CLI command implementations.

pub mod admin;
pub mod seed;
pub mod switches;

use jungle_park_site::config::SiteConfig;
use jungle_park_site::store::JsonStore;

/// Open the JSON store the same way the site server does.
///
/// # Errors
///
/// Returns an error when the environment configuration is invalid.
pub fn open_store() -> Result<JsonStore, jungle_park_site::config::ConfigError> {
    let config = SiteConfig::from_env()?;
    tracing::info!(data_dir = %config.data_dir.display(), "Using data directory");
    Ok(JsonStore::new(config.data_dir))
}
