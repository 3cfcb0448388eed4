//! Credential and refresh-token exchanges.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use wellness_core::{CredentialVerifier, Identity, IdentityId, IdentitySummary, UserDirectory};

use crate::{AuthError, JwtValidator, TokenIssuer, TokenPair, TokenValidator};

/// A freshly issued pair plus the public fields of whoever it was issued to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub tokens: TokenPair,
    pub identity: IdentitySummary,
}

/// Orchestrates login and refresh on top of the external directory and
/// credential verifier.
///
/// Stateless: concurrent calls are independent. Directory and verifier calls
/// may block; no timeout is applied here.
#[derive(Clone)]
pub struct AuthenticationFlow {
    directory: Arc<dyn UserDirectory>,
    verifier: Arc<dyn CredentialVerifier>,
    issuer: TokenIssuer,
    validator: Arc<TokenValidator>,
}

impl AuthenticationFlow {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        verifier: Arc<dyn CredentialVerifier>,
        issuer: TokenIssuer,
        validator: Arc<TokenValidator>,
    ) -> Self {
        Self {
            directory,
            verifier,
            issuer,
            validator,
        }
    }

    /// Exchange credentials for a token pair.
    ///
    /// `username` is tried as an identity id first, then as an email.
    ///
    /// # Errors
    /// `IdentityNotFound`, `IdentityInactive`, `BadCredentials`, plus
    /// `Directory` when the store itself fails.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Authenticated, AuthError> {
        let identity = self.resolve(username)?.ok_or_else(|| {
            tracing::warn!(username, "login for unknown user");
            AuthError::IdentityNotFound(username.to_string())
        })?;

        if !identity.active {
            tracing::warn!(user_id = %identity.id, "login for inactive user");
            return Err(AuthError::IdentityInactive);
        }

        if !self.verifier.verify(&identity, password) {
            tracing::warn!(user_id = %identity.id, "login with bad credentials");
            return Err(AuthError::BadCredentials);
        }

        let authenticated = self.issue(&identity, now)?;
        tracing::info!(user_id = %identity.id, role = %identity.role, "user authenticated");
        Ok(authenticated)
    }

    /// Exchange a still-valid token for a new pair.
    ///
    /// The presented token stays usable until its own expiry; nothing is
    /// revoked.
    ///
    /// # Errors
    /// `InvalidRefreshToken` for any token the validator rejects (expired
    /// included), then `IdentityNotFound` / `IdentityInactive` if the subject
    /// no longer qualifies.
    pub fn refresh(&self, refresh_token: &str, now: DateTime<Utc>) -> Result<Authenticated, AuthError> {
        let claims = self.validator.verify(refresh_token, now).map_err(|e| {
            tracing::warn!(error = %e, "refresh with invalid token");
            AuthError::InvalidRefreshToken(e)
        })?;

        tracing::debug!(subject = %claims.sub, kind = ?claims.kind(), "refresh token accepted");

        let id = IdentityId::new(claims.sub);
        let identity = self
            .directory
            .find_by_id(&id)?
            .ok_or_else(|| AuthError::IdentityNotFound(id.to_string()))?;

        if !identity.active {
            tracing::warn!(user_id = %identity.id, "refresh for inactive user");
            return Err(AuthError::IdentityInactive);
        }

        let authenticated = self.issue(&identity, now)?;
        tracing::info!(user_id = %identity.id, "token pair refreshed");
        Ok(authenticated)
    }

    fn resolve(&self, username: &str) -> Result<Option<Identity>, AuthError> {
        if let Some(identity) = self.directory.find_by_id(&IdentityId::new(username))? {
            return Ok(Some(identity));
        }
        Ok(self.directory.find_by_email(username)?)
    }

    fn issue(&self, identity: &Identity, now: DateTime<Utc>) -> Result<Authenticated, AuthError> {
        Ok(Authenticated {
            tokens: self.issuer.issue_pair(identity, now)?,
            identity: identity.summary(),
        })
    }
}

impl core::fmt::Debug for AuthenticationFlow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthenticationFlow")
            .field("issuer", &self.issuer)
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}
