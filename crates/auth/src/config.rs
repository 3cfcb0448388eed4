//! Token engine configuration.
//!
//! Built once at startup and handed to [`SigningKey::resolve`](crate::SigningKey::resolve)
//! and [`TokenIssuer::new`](crate::TokenIssuer::new). Nothing reads the
//! environment after that.

use core::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::ConfigError;

pub const ENV_SECRET: &str = "JWT_SECRET";
pub const ENV_ALGORITHM: &str = "JWT_ALGORITHM";
pub const ENV_ACCESS_TTL_MS: &str = "JWT_EXPIRATION_MS";
pub const ENV_REFRESH_TTL_MS: &str = "JWT_REFRESH_EXPIRATION_MS";

/// One hour.
pub const DEFAULT_ACCESS_TTL_MS: i64 = 60 * 60 * 1000;
/// Seven days.
pub const DEFAULT_REFRESH_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Immutable configuration for signing and token lifetimes.
///
/// The access TTL is expected to be shorter than the refresh TTL. That is a
/// deployment contract and is not checked here.
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: Vec<u8>,
    pub algorithm: Algorithm,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenConfig {
    /// Config with the given raw secret and default algorithm/lifetimes.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS512,
            access_ttl: Duration::milliseconds(DEFAULT_ACCESS_TTL_MS),
            refresh_ttl: Duration::milliseconds(DEFAULT_REFRESH_TTL_MS),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Read configuration from process environment.
    ///
    /// `JWT_SECRET` is base64 (standard alphabet). Lifetimes are milliseconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), but with an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let encoded = lookup(ENV_SECRET).ok_or(ConfigError::Missing(ENV_SECRET))?;
        let secret = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ConfigError::invalid(ENV_SECRET, format!("not valid base64: {e}")))?;

        let mut config = Self::new(secret);

        if let Some(alg) = lookup(ENV_ALGORITHM) {
            config.algorithm = Algorithm::from_str(alg.trim())
                .map_err(|_| ConfigError::invalid(ENV_ALGORITHM, format!("unknown algorithm '{alg}'")))?;
        }
        if let Some(ms) = lookup(ENV_ACCESS_TTL_MS) {
            config.access_ttl = parse_ttl(ENV_ACCESS_TTL_MS, &ms)?;
        }
        if let Some(ms) = lookup(ENV_REFRESH_TTL_MS) {
            config.refresh_ttl = parse_ttl(ENV_REFRESH_TTL_MS, &ms)?;
        }

        Ok(config)
    }
}

impl core::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret_len", &self.secret.len())
            .field("algorithm", &self.algorithm)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

fn parse_ttl(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let ms: i64 = raw
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid(key, format!("expected milliseconds: {e}")))?;
    if ms <= 0 {
        return Err(ConfigError::invalid(key, "must be positive"));
    }
    Ok(Duration::milliseconds(ms))
}
