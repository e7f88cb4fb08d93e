//! Server configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Default recipe data file, relative to the working directory.
pub const DEFAULT_RECIPES_PATH: &str = "recipes50.json";

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid bind address {value}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub recipes_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PANTRY_RECIPES_PATH`: recipe data file (default: "recipes50.json")
    /// - `PANTRY_BIND_ADDR`: listen address (default: "0.0.0.0:3000")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let recipes_path = lookup("PANTRY_RECIPES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RECIPES_PATH));

        let bind_value = lookup("PANTRY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        Ok(Self {
            recipes_path,
            bind_addr,
        })
    }
}
