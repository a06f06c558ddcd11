//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional; defaults suit local development.
//!
//! - `TRADEPOST_DATABASE_URL` - `SQLite` connection string (default: `sqlite:tradepost.db`)
//! - `TRADEPOST_HOST` - Bind address (default: 127.0.0.1)
//! - `TRADEPOST_PORT` - Listen port (default: 8080)
//! - `TRADEPOST_FRONTEND_ORIGIN` - CORS allowed origin (default: `http://localhost:3000`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `SQLite` database connection URL
    pub database_url: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Frontend origin allowed by CORS
    pub frontend_origin: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_env_or_default("TRADEPOST_DATABASE_URL", "sqlite:tradepost.db");
        let host = get_env_or_default("TRADEPOST_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TRADEPOST_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("TRADEPOST_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TRADEPOST_PORT".to_owned(), e.to_string()))?;
        let frontend_origin =
            get_env_or_default("TRADEPOST_FRONTEND_ORIGIN", "http://localhost:3000");
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            frontend_origin,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            database_url: "sqlite::memory:".to_owned(),
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            frontend_origin: "http://localhost:3000".to_owned(),
            sentry_dsn: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        // A variable name unlikely to exist in any environment.
        let value = get_env_or_default("TRADEPOST_TEST_NO_SUCH_VAR", "fallback");
        assert_eq!(value, "fallback");
    }
}
