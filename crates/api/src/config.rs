//! Service configuration read once at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use wellness_auth::{ConfigError, TokenConfig};

pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_USERS_FILE: &str = "USERS_FILE";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// JSON seed for the user directory. `None` starts with no users.
    pub users_file: Option<PathBuf>,
    pub token: TokenConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.trim().parse().map_err(|e| ConfigError::Invalid {
            key: ENV_BIND_ADDR,
            reason: format!("'{raw_addr}': {e}"),
        })?;

        let users_file = lookup(ENV_USERS_FILE)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            users_file,
            token: TokenConfig::from_lookup(&lookup)?,
        })
    }
}
