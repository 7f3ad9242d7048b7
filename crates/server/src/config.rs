//! Server configuration from the environment

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

/// Invalid server configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid listen address {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Threads in the fitting pool
    pub fit_workers: usize,
    /// Deadline for a single fit, none means unbounded
    pub fit_timeout: Option<Duration>,
    pub search_seed: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            fit_workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
            fit_timeout: None,
            search_seed: 42,
        }
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                name,
                value,
                expected,
            }),
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `FIT_WORKERS`, `FIT_TIMEOUT_SECS` and `SEARCH_SEED`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let fit_workers = match parse::<usize>(&lookup, "FIT_WORKERS", "a positive integer")? {
            Some(0) => {
                return Err(ConfigError::InvalidValue {
                    name: "FIT_WORKERS",
                    value: "0".to_string(),
                    expected: "a positive integer",
                })
            }
            Some(n) => n,
            None => defaults.fit_workers,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse(&lookup, "PORT", "a port number")?.unwrap_or(defaults.port),
            fit_workers,
            fit_timeout: parse::<u64>(&lookup, "FIT_TIMEOUT_SECS", "a number of seconds")?
                .map(Duration::from_secs),
            search_seed: parse(&lookup, "SEARCH_SEED", "an unsigned integer")?
                .unwrap_or(defaults.search_seed),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}
