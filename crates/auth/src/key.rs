//! Process-wide signing key.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::{ConfigError, TokenConfig};

/// Symmetric MAC key resolved once from configuration.
///
/// Immutable after construction; share it (through the codec) by `Arc`.
#[derive(Clone)]
pub struct SigningKey {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
    len: usize,
}

impl SigningKey {
    /// Minimum secret length in bytes (256 bits).
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Validate the configured secret and algorithm and build the key.
    ///
    /// # Errors
    /// [`ConfigError::SecretTooShort`] below 32 bytes, and
    /// [`ConfigError::UnsupportedAlgorithm`] for anything but HS256/HS384/HS512.
    pub fn resolve(config: &TokenConfig) -> Result<Self, ConfigError> {
        if !is_symmetric(config.algorithm) {
            return Err(ConfigError::UnsupportedAlgorithm(format!("{:?}", config.algorithm)));
        }

        let len = config.secret.len();
        if len < Self::MIN_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort {
                actual: len,
                minimum: Self::MIN_SECRET_LENGTH,
            });
        }

        tracing::debug!(algorithm = ?config.algorithm, key_length = len, "signing key resolved");

        Ok(Self {
            algorithm: config.algorithm,
            encoding: EncodingKey::from_secret(&config.secret),
            decoding: DecodingKey::from_secret(&config.secret),
            len,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl core::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm)
            .field("key_length", &self.len)
            .finish_non_exhaustive()
    }
}

fn is_symmetric(algorithm: Algorithm) -> bool {
    matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}
