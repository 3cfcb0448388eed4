//! `wellness-core`: identity model shared by the token service.
//!
//! This crate contains **pure domain** types (no infrastructure concerns):
//! identities, roles, specialties, and the collaborator contracts the token
//! engine consumes to look identities up and check their credentials.

pub mod directory;
pub mod error;
pub mod id;
pub mod identity;

pub use directory::{CredentialVerifier, DirectoryError, UserDirectory};
pub use error::DomainError;
pub use id::IdentityId;
pub use identity::{Identity, IdentitySummary, Role, Specialty};
