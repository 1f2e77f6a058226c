//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults give a working local setup.
//!
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 8000)
//! - `BASE_URL` - Public URL of the site (default: `http://localhost:8000`;
//!   an `https://` URL turns on the Secure cookie flag)
//! - `DATA_DIR` - Directory holding the JSON documents (default: data)
//! - `ROOT_PASSWORD` - Initial password for the auto-provisioned `root`
//!   administrator (default: built-in known password, forced change on
//!   first login)
//! - `RUST_LOG` - Tracing filter (default: `jungle_park_site=debug,info`)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Shortest accepted `ROOT_PASSWORD`, same as the password-change rule.
const MIN_ROOT_PASSWORD_LENGTH: usize = 6;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Directory the JSON documents live in
    pub data_dir: PathBuf,
    /// Override for the initial `root` password
    pub root_password: Option<SecretString>,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse or the root
    /// password override is too short.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("BASE_URL", "http://localhost:8000");
        let data_dir = PathBuf::from(get_env_or_default("DATA_DIR", "data"));
        let root_password = get_optional_env("ROOT_PASSWORD")
            .map(|value| {
                validate_root_password(&value)?;
                Ok(SecretString::from(value))
            })
            .transpose()?;

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            root_password,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (drives the Secure cookie flag).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reject a root password override shorter than the password-change rule
/// would accept; otherwise the forced change could never keep it.
fn validate_root_password(value: &str) -> Result<(), ConfigError> {
    if value.len() < MIN_ROOT_PASSWORD_LENGTH {
        return Err(ConfigError::InsecureSecret(
            "ROOT_PASSWORD".to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_ROOT_PASSWORD_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Expose the configured root password, if any.
#[must_use]
pub fn exposed_root_password(config: &SiteConfig) -> Option<&str> {
    config
        .root_password
        .as_ref()
        .map(ExposeSecret::expose_secret)
}
