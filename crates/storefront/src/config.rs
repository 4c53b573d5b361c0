//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPFRONT_API_URL` - Base URL of the catalog backend (e.g., `http://localhost:5000`)
//!
//! ## Optional
//! - `SHOPFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPFRONT_PORT` - Listen port (default: 3000)
//! - `SHOPFRONT_BASE_URL` - Public URL for the storefront (default: `http://localhost:3000`)
//! - `SHOPFRONT_STATIC_DIR` - Directory served under `/static` (default: crates/storefront/static)
//! - `SHOPFRONT_CATALOG_CACHE_SECS` - Seconds to reuse a fetched product list (default: 60, 0 disables)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory with the stylesheet and other static assets
    pub static_dir: PathBuf,
    /// Catalog backend configuration
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Catalog backend configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; the `/api/...` paths are appended to it.
    pub api_url: Url,
    /// How long a fetched product list is reused. Zero disables caching.
    pub cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("SHOPFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("SHOPFRONT_PORT", "3000")?;
        let base_url = get_env_or_default("SHOPFRONT_BASE_URL", "http://localhost:3000");
        let static_dir =
            PathBuf::from(get_env_or_default("SHOPFRONT_STATIC_DIR", "crates/storefront/static"));

        let catalog = CatalogConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            catalog,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_required_env("SHOPFRONT_API_URL")?;
        let api_url = parse_api_url(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPFRONT_API_URL".to_string(), e))?;
        let cache_secs: u64 = parse_env("SHOPFRONT_CATALOG_CACHE_SECS", "60")?;

        Ok(Self {
            api_url,
            cache_ttl: Duration::from_secs(cache_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the catalog base URL. Only http(s) URLs with a host are accepted.
fn parse_api_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("URL must have a host".to_string());
    }
    Ok(url)
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: base_url.to_string(),
            static_dir: PathBuf::from("static"),
            catalog: CatalogConfig {
                api_url: Url::parse("http://localhost:5000").unwrap(),
                cache_ttl: Duration::from_secs(60),
            },
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config("http://localhost:3000").socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure() {
        assert!(!config("http://localhost:3000").is_secure());
        assert!(config("https://shop.example.com").is_secure());
    }

    #[test]
    fn test_parse_api_url() {
        assert!(parse_api_url("http://localhost:5000").is_ok());
        assert!(parse_api_url(" https://api.example.com/base ").is_ok());
        assert!(parse_api_url("ftp://example.com").is_err());
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn test_parse_env_uses_default() {
        let port: u16 = parse_env("SHOPFRONT_TEST_UNSET_PORT", "4000").unwrap();
        assert_eq!(port, 4000);

        let result: Result<u16, _> = parse_env("SHOPFRONT_TEST_UNSET_PORT", "huge");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }
}
