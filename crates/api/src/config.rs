//! Server configuration read from the environment.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Largest accepted request body. A maximal note (100 000 characters of
/// content, up to 4 bytes each, plus title and JSON framing) fits.
pub const DEFAULT_MAX_BODY_BYTES: usize = 512 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be set")]
    Missing { key: &'static str },

    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Settings for the API binary.
///
/// | Env Var                 | Default                 |
/// |-------------------------|-------------------------|
/// | `DATABASE_URL`          | required                |
/// | `HOST`                  | `0.0.0.0`               |
/// | `PORT`                  | `3000`                  |
/// | `CORS_ORIGINS`          | `http://localhost:5173` |
/// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
/// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
/// | `MAX_BODY_BYTES`        | `524288`                |
/// | `DB_MAX_CONNECTIONS`    | `20`                    |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    /// Origins allowed by CORS; comma-separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
    /// Upper bound on closing the database pool after the listener stops.
    pub shutdown_timeout: Duration,
    pub max_body_bytes: usize,
    pub db_max_connections: u32,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing {
            key: "DATABASE_URL",
        })?;

        Ok(Self {
            database_url,
            host: parse_var(&lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_var(&lookup, "PORT", 3000)?,
            cors_origins: parse_origins(
                lookup("CORS_ORIGINS")
                    .as_deref()
                    .unwrap_or("http://localhost:5173"),
            ),
            request_timeout: Duration::from_secs(parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30)?),
            shutdown_timeout: Duration::from_secs(parse_var(
                &lookup,
                "SHUTDOWN_TIMEOUT_SECS",
                30,
            )?),
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            db_max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", 20)?,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
