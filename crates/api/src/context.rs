use wellness_auth::Claims;
use wellness_core::{IdentityId, Specialty};

/// Principal context for a request (authenticated identity + roles).
///
/// Inserted as a request extension by the auth gate; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    subject: IdentityId,
    roles: Vec<String>,
    specialty: Option<Specialty>,
}

impl PrincipalContext {
    pub fn new(subject: IdentityId, roles: Vec<String>, specialty: Option<Specialty>) -> Self {
        Self {
            subject,
            roles,
            specialty,
        }
    }

    pub fn from_claims(claims: Claims) -> Self {
        let specialty = claims.specialty();
        Self::new(IdentityId::new(claims.sub), claims.roles, specialty)
    }

    pub fn subject(&self) -> &IdentityId {
        &self.subject
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn specialty(&self) -> Option<Specialty> {
        self.specialty
    }
}
