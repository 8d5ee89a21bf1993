//! services/frontend/src/config.rs
//!
//! Defines the service's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use chrono::Duration;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Base URL of the ratings/recommendation backend API.
    pub backend_url: String,
    pub log_level: Level,
    /// Sliding lifetime of a signed-in session.
    pub session_ttl: Duration,
    /// How often expired sessions are swept from the store.
    pub session_sweep_interval: std::time::Duration,
    /// Adds the `Secure` attribute to the session cookie.
    pub cookie_secure: bool,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            backend_url: "http://localhost:3001".to_string(),
            log_level: Level::INFO,
            session_ttl: Duration::days(30),
            session_sweep_interval: std::time::Duration::from_secs(300),
            cookie_secure: false,
            static_dir: PathBuf::from("./public"),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// [`Config::default`] for anything unset.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        let defaults = Self::default();

        let bind_address = parse_var("BIND_ADDRESS")?.unwrap_or(defaults.bind_address);

        let backend_url = std::env::var("BACKEND_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.backend_url);
        if backend_url.is_empty() {
            return Err(ConfigError::MissingVar("BACKEND_URL".to_string()));
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let session_ttl = match parse_var::<i64>("SESSION_TTL_SECS")? {
            Some(secs) if secs > 0 => Duration::seconds(secs),
            Some(secs) => {
                return Err(ConfigError::InvalidValue(
                    "SESSION_TTL_SECS".to_string(),
                    format!("{secs} must be positive"),
                ))
            }
            None => defaults.session_ttl,
        };

        let session_sweep_interval = match parse_var::<u64>("SESSION_SWEEP_SECS")? {
            Some(0) => {
                return Err(ConfigError::InvalidValue(
                    "SESSION_SWEEP_SECS".to_string(),
                    "0 must be positive".to_string(),
                ))
            }
            Some(secs) => std::time::Duration::from_secs(secs),
            None => defaults.session_sweep_interval,
        };

        let cookie_secure = parse_var("COOKIE_SECURE")?.unwrap_or(defaults.cookie_secure);

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        Ok(Self {
            bind_address,
            backend_url,
            log_level,
            session_ttl,
            session_sweep_interval,
            cookie_secure,
            static_dir,
        })
    }
}

/// Reads and parses an optional variable.
fn parse_var<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_reports_the_offending_key() {
        std::env::set_var("FLIXR_TEST_BAD_PORT", "not-a-number");
        let err = parse_var::<u16>("FLIXR_TEST_BAD_PORT").unwrap_err();
        assert!(err.to_string().contains("FLIXR_TEST_BAD_PORT"));
        std::env::remove_var("FLIXR_TEST_BAD_PORT");
    }

    #[test]
    fn parse_var_is_none_when_unset() {
        assert!(parse_var::<u16>("FLIXR_TEST_SURELY_UNSET").unwrap().is_none());
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.backend_url, "http://localhost:3001");
        assert_eq!(config.bind_address.port(), 3000);
        assert_eq!(config.session_ttl, Duration::days(30));
        assert!(!config.cookie_secure);
    }
}
