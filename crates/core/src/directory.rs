//! Collaborator contracts: where identities come from and how their
//! credentials are checked.
//!
//! Both are implemented outside the token engine (database, seeded file,
//! test fakes). Implementations may block on I/O; callers impose any timeout.

use thiserror::Error;

use crate::{Identity, IdentityId};

/// Failure of the backing store behind a [`UserDirectory`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("user directory unavailable: {0}")]
pub struct DirectoryError(pub String);

impl DirectoryError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Read-only identity lookup.
pub trait UserDirectory: Send + Sync {
    fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, DirectoryError>;

    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DirectoryError>;
}

/// Checks a plaintext password against whatever the identity's store holds.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, identity: &Identity, password: &str) -> bool;
}
