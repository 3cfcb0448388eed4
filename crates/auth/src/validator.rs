//! Token validation and introspection.
//!
//! One pipeline, three views of it:
//! - [`TokenValidator::validate`]: full [`ValidationResult`] for introspection.
//! - [`TokenValidator::is_token_valid`]: boolean for cheap gating.
//! - [`JwtValidator::verify`]: claims or a typed error, for the request gate.
//!
//! All three go through the same decode-then-expiry check and cannot disagree.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use wellness_core::Specialty;

use crate::{Claims, ErrorKind, TokenCodec, TokenError};

/// Threshold used by introspection responses for `expiring_soon`.
pub const EXPIRING_SOON_THRESHOLD_SECS: i64 = 5 * 60;

pub fn expiring_soon_threshold() -> Duration {
    Duration::seconds(EXPIRING_SOON_THRESHOLD_SECS)
}

/// Verifies a bearer token and yields its claims.
///
/// This is the seam the per-request authentication gate depends on.
pub trait JwtValidator: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError>;
}

/// Outcome of a detailed validation. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub expired: bool,
    pub subject: Option<String>,
    pub roles: Vec<String>,
    pub specialty: Option<Specialty>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub remaining: Option<Duration>,
    pub error_kind: Option<ErrorKind>,
    pub error_message: Option<String>,
}

impl ValidationResult {
    fn rejected(err: &TokenError) -> Self {
        Self {
            valid: false,
            expired: false,
            subject: None,
            roles: Vec::new(),
            specialty: None,
            issued_at: None,
            expires_at: None,
            remaining: None,
            error_kind: Some(err.kind()),
            error_message: Some(err.to_string()),
        }
    }

    fn expired(claims: Claims) -> Self {
        let err = TokenError::Expired;
        Self {
            valid: false,
            expired: true,
            subject: Some(claims.sub),
            roles: Vec::new(),
            specialty: None,
            issued_at: Some(claims.iat),
            expires_at: Some(claims.exp),
            remaining: Some(Duration::zero()),
            error_kind: Some(err.kind()),
            error_message: Some(err.to_string()),
        }
    }

    fn live(claims: Claims, remaining: Duration) -> Self {
        let specialty = claims.specialty();
        Self {
            valid: true,
            expired: false,
            subject: Some(claims.sub),
            roles: claims.roles,
            specialty,
            issued_at: Some(claims.iat),
            expires_at: Some(claims.exp),
            remaining: Some(remaining),
            error_kind: None,
            error_message: None,
        }
    }

    /// `remaining <= threshold`. An unknown remaining time counts as zero.
    pub fn is_expiring_soon(&self, threshold: Duration) -> bool {
        self.remaining.unwrap_or_else(Duration::zero) <= threshold
    }

    /// Remaining time rendered with [`format_remaining`], when known.
    pub fn remaining_time(&self) -> Option<String> {
        self.remaining.map(format_remaining)
    }
}

enum Checked {
    Live { claims: Claims, remaining: Duration },
    Expired { claims: Claims },
}

/// Classifies token strings. Stateless apart from the shared codec.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    codec: Arc<TokenCodec>,
}

impl TokenValidator {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Signature first, expiry second.
    fn check(&self, token: &str, now: DateTime<Utc>) -> Result<Checked, TokenError> {
        let claims = self.codec.decode(token).inspect_err(|e| {
            tracing::debug!(error = %e, "token rejected");
        })?;

        if claims.is_expired_at(now) {
            tracing::warn!(subject = %claims.sub, expired_at = %claims.exp, "token is expired");
            return Ok(Checked::Expired { claims });
        }

        let remaining = claims.exp - now;
        Ok(Checked::Live { claims, remaining })
    }

    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> ValidationResult {
        match self.check(token, now) {
            Ok(Checked::Live { claims, remaining }) => ValidationResult::live(claims, remaining),
            Ok(Checked::Expired { claims }) => ValidationResult::expired(claims),
            Err(e) => ValidationResult::rejected(&e),
        }
    }

    pub fn is_token_valid(&self, token: &str, now: DateTime<Utc>) -> bool {
        matches!(self.check(token, now), Ok(Checked::Live { .. }))
    }
}

impl JwtValidator for TokenValidator {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        match self.check(token, now)? {
            Checked::Live { claims, .. } => Ok(claims),
            Checked::Expired { .. } => Err(TokenError::Expired),
        }
    }
}

/// Render a duration as `"1 day, 2 hours, 5 seconds"`.
///
/// Units are days, hours, minutes, seconds; zero units are skipped; never
/// empty (`"0 seconds"` for zero or negative input). Sub-second remainders
/// are dropped.
pub fn format_remaining(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total / 3_600) % 24;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;

    let mut parts: Vec<String> = Vec::with_capacity(4);
    for (value, unit) in [(days, "day"), (hours, "hour"), (minutes, "minute")] {
        if value > 0 {
            parts.push(unit_phrase(value, unit));
        }
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(unit_phrase(seconds, "second"));
    }

    parts.join(", ")
}

fn unit_phrase(value: i64, unit: &str) -> String {
    if value == 1 {
        format!("{value} {unit}")
    } else {
        format!("{value} {unit}s")
    }
}
