//! Token claims (the signed payload).

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::Specialty;

/// Payload carried by every token this service issues.
///
/// Field names and order are the wire format: `sub`, `roles`, optional
/// `specialty`, `iat`, `exp`, optional `jti`. Timestamps are whole seconds
/// since the epoch. Absent optionals are omitted, never `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id.
    pub sub: String,

    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,

    /// Unique id; present on refresh tokens only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Which of the two token shapes a set of claims represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl Claims {
    /// Build claims, truncating both timestamps to whole seconds so they
    /// survive an encode/decode round trip unchanged.
    pub fn new(
        sub: impl Into<String>,
        roles: Vec<String>,
        specialty: Option<String>,
        iat: DateTime<Utc>,
        exp: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: sub.into(),
            roles,
            specialty,
            iat: iat.trunc_subsecs(0),
            exp: exp.trunc_subsecs(0),
            jti: None,
        }
    }

    pub fn with_jti(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    pub fn kind(&self) -> TokenKind {
        if self.jti.is_some() {
            TokenKind::Refresh
        } else {
            TokenKind::Access
        }
    }

    /// `exp` strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp < now
    }

    /// Specialty claim parsed into the domain enum. Unknown names yield `None`.
    pub fn specialty(&self) -> Option<Specialty> {
        let raw = self.specialty.as_deref()?;
        match raw.parse() {
            Ok(specialty) => Some(specialty),
            Err(_) => {
                tracing::debug!(specialty = raw, "ignoring unknown specialty claim");
                None
            }
        }
    }
}
