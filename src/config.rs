//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Optional Variables
//!
//! - `DATABASE_URL` - SQLite database (default: `sqlite://links.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`, or `0.0.0.0:$PORT` when `PORT` is set)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `PUBLIC_BASE_URL` - Origin used in generated redirect URLs instead of the request's `Host`
//! - `BEHIND_PROXY` - Trust `X-Forwarded-Proto` / `X-Forwarded-Host` (default: `false`)
//! - `ALLOWED_ORIGINS` - Comma-separated CORS origins (default: `http://localhost:3000`)
//! - `STATIC_DIR` - Directory holding the dashboard assets (default: `public`)
//! - `QR_IMAGE_FORMAT` - `png` or `svg` (default: `png`)
//! - `QR_MIN_DIMENSION` - Minimum QR image size in pixels (default: 200)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Seconds to wait for a pooled connection (default: 30)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::infrastructure::qr::QrImageFormat;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Fixed origin for generated redirect URLs, e.g. `https://qr.example.com`.
    pub public_base_url: Option<String>,
    /// When true, the request origin is read from X-Forwarded-Proto / X-Forwarded-Host.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub allowed_origins: Vec<String>,
    pub static_dir: String,
    pub qr_image_format: QrImageFormat,
    pub qr_min_dimension: u32,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://links.db".to_string());

        let listen_addr = Self::load_listen_addr();
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|_| vec!["http://localhost:3000".to_string()]);

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

        let qr_image_format = match env::var("QR_IMAGE_FORMAT") {
            Ok(v) => v
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid QR_IMAGE_FORMAT")?,
            Err(_) => QrImageFormat::Png,
        };

        let qr_min_dimension = parse_env("QR_MIN_DIMENSION", 200)?;
        let db_max_connections = parse_env("DB_MAX_CONNECTIONS", 5)?;
        let db_connect_timeout = parse_env("DB_CONNECT_TIMEOUT", 30)?;

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            public_base_url,
            behind_proxy,
            allowed_origins,
            static_dir,
            qr_image_format,
            qr_min_dimension,
            db_max_connections,
            db_connect_timeout,
        })
    }

    /// Loads the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:$PORT` when `PORT` is set
    /// 3. `0.0.0.0:3000`
    fn load_listen_addr() -> String {
        if let Ok(listen) = env::var("LISTEN") {
            return listen;
        }

        match env::var("PORT") {
            Ok(port) => format!("0.0.0.0:{}", port.trim()),
            Err(_) => "0.0.0.0:3000".to_string(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `database_url` is not a SQLite URL
    /// - `public_base_url` is not an absolute http(s) URL
    /// - QR or pool settings are out of range
    pub fn validate(&self) -> Result<()> {
        // Validate log format
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        // Validate listen address format
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        // Validate database URL format
        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if let Some(ref base) = self.public_base_url {
            let parsed = url::Url::parse(base)
                .with_context(|| format!("PUBLIC_BASE_URL is not a valid URL: '{base}'"))?;
            if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
                anyhow::bail!("PUBLIC_BASE_URL must be an http(s) URL with a host, got '{base}'");
            }
        }

        if !(21..=4096).contains(&self.qr_min_dimension) {
            anyhow::bail!(
                "QR_MIN_DIMENSION must be between 21 and 4096, got {}",
                self.qr_min_dimension
            );
        }

        // Validate pool settings
        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    pub fn db_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.db_connect_timeout)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        match self.public_base_url {
            Some(ref base) => tracing::info!("  Public base URL: {}", base),
            None => tracing::info!("  Public base URL: from request Host header"),
        }
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Allowed origins: {}", self.allowed_origins.join(", "));
        tracing::info!("  Static dir: {}", self.static_dir);
        tracing::info!(
            "  QR image: {} (min {}px)",
            self.qr_image_format,
            self.qr_min_dimension
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Splits a comma-separated origin list, dropping blanks and trailing slashes.
/// Reads a numeric variable, falling back to `default` only when it is unset.
fn parse_env<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {name}: '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            database_url: "sqlite://links.db".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            public_base_url: None,
            behind_proxy: false,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            static_dir: "public".to_string(),
            qr_image_format: QrImageFormat::Png,
            qr_min_dimension: 200,
            db_max_connections: 5,
            db_connect_timeout: 30,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        // Test invalid log format
        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        // Test invalid listen address
        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        // Test invalid database URL
        config.database_url = "postgres://localhost/test".to_string();
        assert!(config.validate().is_err());

        config.database_url = "sqlite::memory:".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_public_base_url_validation() {
        let mut config = valid_config();

        config.public_base_url = Some("https://qr.example.com".to_string());
        assert!(config.validate().is_ok());

        config.public_base_url = Some("qr.example.com".to_string());
        assert!(config.validate().is_err());

        config.public_base_url = Some("ftp://qr.example.com".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_qr_and_pool_validation() {
        let mut config = valid_config();

        config.qr_min_dimension = 10;
        assert!(config.validate().is_err());
        config.qr_min_dimension = 200;

        config.db_max_connections = 0;
        assert!(config.validate().is_err());
        config.db_max_connections = 5;

        config.db_connect_timeout = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:3000, https://qr.example.com/ ,,"),
            vec![
                "http://localhost:3000".to_string(),
                "https://qr.example.com".to_string()
            ]
        );
    }

    #[test]
    #[serial]
    fn test_listen_addr_priority() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("LISTEN");
            env::set_var("PORT", "8080");
        }
        assert_eq!(Config::load_listen_addr(), "0.0.0.0:8080");

        unsafe {
            env::set_var("LISTEN", "127.0.0.1:9000");
        }
        assert_eq!(Config::load_listen_addr(), "127.0.0.1:9000");

        // Cleanup
        unsafe {
            env::remove_var("LISTEN");
            env::remove_var("PORT");
        }
        assert_eq!(Config::load_listen_addr(), "0.0.0.0:3000");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_and_overrides() {
        // SAFETY: Tests are run serially
        unsafe {
            env::remove_var("DATABASE_URL");
            env::set_var("QR_IMAGE_FORMAT", "svg");
            env::set_var("PUBLIC_BASE_URL", "https://qr.example.com/");
            env::set_var("BEHIND_PROXY", "1");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.database_url, "sqlite://links.db");
        assert_eq!(config.qr_image_format, QrImageFormat::Svg);
        assert_eq!(
            config.public_base_url.as_deref(),
            Some("https://qr.example.com")
        );
        assert!(config.behind_proxy);

        unsafe {
            env::set_var("QR_IMAGE_FORMAT", "gif");
        }
        assert!(Config::from_env().is_err());

        // Cleanup
        unsafe {
            env::remove_var("QR_IMAGE_FORMAT");
            env::remove_var("PUBLIC_BASE_URL");
            env::remove_var("BEHIND_PROXY");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unparsable_numbers() {
        for name in ["QR_MIN_DIMENSION", "DB_MAX_CONNECTIONS", "DB_CONNECT_TIMEOUT"] {
            // SAFETY: Tests are run serially
            unsafe {
                env::set_var(name, "lots");
            }

            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains(name), "{name}: {err}");

            unsafe {
                env::set_var(name, "42");
            }
            assert!(Config::from_env().is_ok());

            unsafe {
                env::remove_var(name);
            }
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.qr_min_dimension, 200);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_connect_timeout, 30);
    }
}
