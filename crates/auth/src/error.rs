//! Error taxonomy of the token engine.
//!
//! Every failure crossing the crate boundary is one of these enums. Each maps
//! onto an [`ErrorKind`], which is transport-agnostic: status codes are the
//! boundary layer's business.

use thiserror::Error;

use wellness_core::DirectoryError;

/// Transport-agnostic classification of every failure the engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedToken,
    BadSignature,
    UnsupportedAlgorithm,
    EmptyOrNullInput,
    TokenExpired,
    IdentityNotFound,
    IdentityInactive,
    BadCredentials,
    InvalidRefreshToken,
    ConfigurationError,
    DirectoryUnavailable,
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code (used as the `error` field on the wire).
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedToken => "malformed_token",
            ErrorKind::BadSignature => "bad_signature",
            ErrorKind::UnsupportedAlgorithm => "unsupported_algorithm",
            ErrorKind::EmptyOrNullInput => "empty_token",
            ErrorKind::TokenExpired => "token_expired",
            ErrorKind::IdentityNotFound => "identity_not_found",
            ErrorKind::IdentityInactive => "identity_inactive",
            ErrorKind::BadCredentials => "bad_credentials",
            ErrorKind::InvalidRefreshToken => "invalid_refresh_token",
            ErrorKind::ConfigurationError => "configuration_error",
            ErrorKind::DirectoryUnavailable => "directory_unavailable",
            ErrorKind::Internal => "internal_error",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to decode, verify, or (rarely) encode a token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token string is empty")]
    EmptyOrNullInput,

    #[error("token is malformed: {0}")]
    MalformedToken(String),

    #[error("token signature does not verify")]
    BadSignature,

    #[error("token algorithm is unsupported: {0}")]
    UnsupportedAlgorithm(String),

    #[error("token is expired")]
    Expired,

    /// Claims could not be serialized or signed. Never caused by caller input.
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::EmptyOrNullInput => ErrorKind::EmptyOrNullInput,
            TokenError::MalformedToken(_) => ErrorKind::MalformedToken,
            TokenError::BadSignature => ErrorKind::BadSignature,
            TokenError::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            TokenError::Expired => ErrorKind::TokenExpired,
            TokenError::Encoding(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedToken(msg.into())
    }
}

/// Failure of an authentication or refresh exchange.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("user not found: {0}")]
    IdentityNotFound(String),

    #[error("user account is inactive")]
    IdentityInactive,

    #[error("invalid username or password")]
    BadCredentials,

    #[error("invalid refresh token: {0}")]
    InvalidRefreshToken(#[source] TokenError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::IdentityNotFound(_) => ErrorKind::IdentityNotFound,
            AuthError::IdentityInactive => ErrorKind::IdentityInactive,
            AuthError::BadCredentials => ErrorKind::BadCredentials,
            AuthError::InvalidRefreshToken(_) => ErrorKind::InvalidRefreshToken,
            AuthError::Directory(_) => ErrorKind::DirectoryUnavailable,
            AuthError::Token(e) => e.kind(),
        }
    }
}

/// Startup configuration failure. Fatal: the service must not start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    #[error("invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("signing secret too short: got {actual} bytes, need at least {minimum}")]
    SecretTooShort { actual: usize, minimum: usize },

    #[error("signing algorithm {0} is not a symmetric MAC algorithm")]
    UnsupportedAlgorithm(String),
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ConfigurationError
    }

    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}
