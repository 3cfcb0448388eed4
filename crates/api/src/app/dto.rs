use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_auth::{Authenticated, ValidationResult, expiring_soon_threshold};
use wellness_core::{IdentityId, Role, Specialty};

use crate::app::errors;
use crate::context::PrincipalContext;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub token: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), axum::response::Response> {
        if self.username.trim().is_empty() {
            return Err(errors::validation_error("username is required"));
        }
        if self.password.is_empty() {
            return Err(errors::validation_error("password is required"));
        }
        Ok(())
    }
}

impl TokenRequest {
    pub fn validate(&self) -> Result<(), axum::response::Response> {
        if self.bare_token().is_empty() {
            return Err(errors::validation_error("token is required"));
        }
        Ok(())
    }

    /// The token with an optional `Bearer ` prefix removed.
    pub fn bare_token(&self) -> &str {
        let token = self.token.trim_start();
        token.strip_prefix("Bearer ").unwrap_or(token).trim()
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub id: IdentityId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl From<Authenticated> for AuthResponse {
    fn from(auth: Authenticated) -> Self {
        Self {
            token: auth.tokens.access_token.into_string(),
            refresh_token: auth.tokens.refresh_token.into_string(),
            token_type: "Bearer",
            id: auth.identity.id,
            full_name: auth.identity.full_name,
            email: auth.identity.email,
            role: auth.identity.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub expired: bool,
    pub subject: Option<String>,
    pub specialty: Option<Specialty>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub remaining_time: Option<String>,
    pub error: Option<&'static str>,
    pub error_message: Option<String>,
    pub expiring_soon: bool,
}

impl From<ValidationResult> for ValidationResponse {
    fn from(result: ValidationResult) -> Self {
        Self {
            valid: result.valid,
            expired: result.expired,
            remaining_time: result.remaining_time(),
            expiring_soon: result.is_expiring_soon(expiring_soon_threshold()),
            subject: result.subject,
            specialty: result.specialty,
            issued_at: result.issued_at,
            expires_at: result.expires_at,
            error: result.error_kind.map(|k| k.as_str()),
            error_message: result.error_message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub valid: bool,
    pub message: &'static str,
}

impl CheckResponse {
    pub fn new(valid: bool) -> Self {
        let message = if valid {
            "Token is valid"
        } else {
            "Token is invalid or expired"
        };
        Self { valid, message }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub subject: IdentityId,
    pub roles: Vec<String>,
    pub specialty: Option<Specialty>,
}

impl From<PrincipalContext> for MeResponse {
    fn from(principal: PrincipalContext) -> Self {
        Self {
            subject: principal.subject().clone(),
            roles: principal.roles().to_vec(),
            specialty: principal.specialty(),
        }
    }
}
