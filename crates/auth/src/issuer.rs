//! Access/refresh token issuance.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use wellness_core::Identity;

use crate::{Claims, ConfigError, TokenCodec, TokenConfig, TokenError};

/// Signed short-lived token presented on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

/// Signed long-lived token exchanged for a fresh pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RefreshToken(String);

macro_rules! impl_token_string {
    ($t:ty) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_token_string!(AccessToken);
impl_token_string!(RefreshToken);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

/// Turns an identity into signed tokens. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    codec: Arc<TokenCodec>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(codec: Arc<TokenCodec>, config: &TokenConfig) -> Result<Self, ConfigError> {
        if config.access_ttl <= Duration::zero() {
            return Err(ConfigError::invalid("access_ttl", "must be positive"));
        }
        if config.refresh_ttl <= Duration::zero() {
            return Err(ConfigError::invalid("refresh_ttl", "must be positive"));
        }

        Ok(Self {
            codec,
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        })
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Claims for an access token: subject, role, staff specialty, no `jti`.
    pub fn access_claims(&self, identity: &Identity, now: DateTime<Utc>) -> Claims {
        base_claims(identity, now, self.access_ttl)
    }

    /// Claims for a refresh token: same as access, longer expiry, fresh `jti`.
    pub fn refresh_claims(&self, identity: &Identity, now: DateTime<Utc>) -> Claims {
        base_claims(identity, now, self.refresh_ttl).with_jti(Uuid::new_v4().to_string())
    }

    pub fn issue_access_token(
        &self,
        identity: &Identity,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, TokenError> {
        let claims = self.access_claims(identity, now);
        self.codec.encode(&claims).map(AccessToken)
    }

    pub fn issue_refresh_token(
        &self,
        identity: &Identity,
        now: DateTime<Utc>,
    ) -> Result<RefreshToken, TokenError> {
        let claims = self.refresh_claims(identity, now);
        self.codec.encode(&claims).map(RefreshToken)
    }

    /// Issue both tokens against the same `now`.
    pub fn issue_pair(&self, identity: &Identity, now: DateTime<Utc>) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(identity, now)?,
            refresh_token: self.issue_refresh_token(identity, now)?,
        })
    }
}

fn base_claims(identity: &Identity, now: DateTime<Utc>, ttl: Duration) -> Claims {
    Claims::new(
        identity.id.as_str(),
        vec![identity.role.as_str().to_string()],
        identity.token_specialty().map(|s| s.as_str().to_string()),
        now,
        now + ttl,
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use wellness_core::{IdentityId, Role, Specialty};

    use super::*;
    use crate::{SigningKey, TokenKind};

    fn issuer() -> (TokenIssuer, Arc<TokenCodec>) {
        let config = TokenConfig::new(vec![9u8; 64])
            .with_access_ttl(Duration::hours(1))
            .with_refresh_ttl(Duration::days(7));
        let codec = Arc::new(TokenCodec::new(SigningKey::resolve(&config).unwrap()));
        (TokenIssuer::new(codec.clone(), &config).unwrap(), codec)
    }

    fn identity(role: Role, specialty: Option<Specialty>) -> Identity {
        Identity {
            id: IdentityId::new("1000100100"),
            email: "alice@example.com".to_string(),
            full_name: "Alice Smith".to_string(),
            role,
            specialty,
            active: true,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn access_token_carries_staff_specialty() {
        let (issuer, codec) = issuer();
        let doctor = identity(Role::MedicalStaff, Some(Specialty::GeneralMedicine));

        let token = issuer.issue_access_token(&doctor, t0()).unwrap();
        let claims = codec.decode(token.as_str()).unwrap();

        assert_eq!(claims.sub, "1000100100");
        assert_eq!(claims.roles, vec!["MEDICAL_STAFF".to_string()]);
        assert_eq!(claims.specialty.as_deref(), Some("GENERAL_MEDICINE"));
        assert_eq!(claims.iat, t0());
        assert_eq!(claims.exp, t0() + Duration::hours(1));
        assert_eq!(claims.kind(), TokenKind::Access);
    }

    #[test]
    fn non_staff_payload_has_no_specialty_key() {
        let (issuer, codec) = issuer();
        let student = identity(Role::Student, Some(Specialty::Nutrition));

        let token = issuer.issue_access_token(&student, t0()).unwrap();
        let claims = codec.decode(token.as_str()).unwrap();
        assert_eq!(claims.specialty, None);

        let payload = serde_json::to_value(&claims).unwrap();
        assert!(payload.get("specialty").is_none());
    }

    #[test]
    fn refresh_token_has_jti_and_longer_expiry() {
        let (issuer, codec) = issuer();
        let trainer = identity(Role::Trainer, Some(Specialty::PhysicalTraining));

        let token = issuer.issue_refresh_token(&trainer, t0()).unwrap();
        let claims = codec.decode(token.as_str()).unwrap();

        assert_eq!(claims.kind(), TokenKind::Refresh);
        assert_eq!(claims.exp, t0() + Duration::days(7));
        assert_eq!(claims.specialty.as_deref(), Some("PHYSICAL_TRAINING"));
        assert!(Uuid::parse_str(claims.jti.as_deref().unwrap()).is_ok());
    }

    #[test]
    fn every_refresh_token_gets_a_fresh_jti() {
        let (issuer, _) = issuer();
        let who = identity(Role::Student, None);

        let a = issuer.refresh_claims(&who, t0());
        let b = issuer.refresh_claims(&who, t0());
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn pair_shares_issued_at() {
        let (issuer, codec) = issuer();
        let pair = issuer.issue_pair(&identity(Role::Monitor, None), t0()).unwrap();

        let access = codec.decode(pair.access_token.as_str()).unwrap();
        let refresh = codec.decode(pair.refresh_token.as_str()).unwrap();
        assert_eq!(access.iat, refresh.iat);
        assert!(access.exp < refresh.exp);
    }

    #[test]
    fn rejects_non_positive_ttl() {
        let config = TokenConfig::new(vec![9u8; 64]).with_access_ttl(Duration::zero());
        let codec = Arc::new(TokenCodec::new(SigningKey::resolve(&config).unwrap()));
        assert!(TokenIssuer::new(codec, &config).is_err());
    }
}
