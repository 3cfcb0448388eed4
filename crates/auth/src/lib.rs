//! `wellness-auth`: token lifecycle engine.
//!
//! Issues, signs, decodes and validates compact signed tokens, and runs the
//! login/refresh exchanges on top of an external user directory. Decoupled
//! from HTTP and storage; every operation takes the current time explicitly.

pub mod claims;
pub mod codec;
pub mod config;
pub mod error;
pub mod flow;
pub mod issuer;
pub mod key;
pub mod validator;

pub use claims::{Claims, TokenKind};
pub use codec::TokenCodec;
pub use config::TokenConfig;
pub use error::{AuthError, ConfigError, ErrorKind, TokenError};
pub use flow::{Authenticated, AuthenticationFlow};
pub use issuer::{AccessToken, RefreshToken, TokenIssuer, TokenPair};
pub use key::SigningKey;
pub use validator::{
    EXPIRING_SOON_THRESHOLD_SECS, JwtValidator, TokenValidator, ValidationResult,
    expiring_soon_threshold, format_remaining,
};

pub use jsonwebtoken::Algorithm;

use std::sync::Arc;

/// Fully wired engine built from one [`TokenConfig`].
#[derive(Debug, Clone)]
pub struct TokenEngine {
    pub codec: Arc<TokenCodec>,
    pub issuer: TokenIssuer,
    pub validator: Arc<TokenValidator>,
}

impl TokenEngine {
    /// Resolve the signing key and build codec, issuer and validator.
    ///
    /// # Errors
    /// Any [`ConfigError`]; callers should treat it as fatal.
    pub fn from_config(config: &TokenConfig) -> Result<Self, ConfigError> {
        let codec = Arc::new(TokenCodec::new(SigningKey::resolve(config)?));
        Ok(Self {
            issuer: TokenIssuer::new(codec.clone(), config)?,
            validator: Arc::new(TokenValidator::new(codec.clone())),
            codec,
        })
    }
}
