//! In-memory collaborators for exercising the authentication flow.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use wellness_auth::{AuthenticationFlow, TokenConfig, TokenEngine};
use wellness_core::{
    CredentialVerifier, DirectoryError, Identity, IdentityId, Role, Specialty, UserDirectory,
};

pub const SECRET: &[u8] = b"integration-test-secret-that-is-at-least-32-bytes";

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 18, 12, 0, 0).unwrap()
}

pub fn identity(id: &str, email: &str, role: Role, specialty: Option<Specialty>) -> Identity {
    Identity {
        id: IdentityId::new(id),
        email: email.to_string(),
        full_name: format!("User {id}"),
        role,
        specialty,
        active: true,
    }
}

/// Directory backed by a map; can be told to fail every lookup.
#[derive(Default)]
pub struct InMemoryDirectory {
    users: Mutex<HashMap<String, Identity>>,
    unavailable: Mutex<bool>,
}

impl InMemoryDirectory {
    pub fn insert(&self, identity: Identity) {
        self.users
            .lock()
            .unwrap()
            .insert(identity.id.as_str().to_string(), identity);
    }

    pub fn remove(&self, id: &str) {
        self.users.lock().unwrap().remove(id);
    }

    pub fn deactivate(&self, id: &str) {
        if let Some(identity) = self.users.lock().unwrap().get_mut(id) {
            identity.active = false;
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    fn check(&self) -> Result<(), DirectoryError> {
        if *self.unavailable.lock().unwrap() {
            Err(DirectoryError::new("connection refused"))
        } else {
            Ok(())
        }
    }
}

impl UserDirectory for InMemoryDirectory {
    fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, DirectoryError> {
        self.check()?;
        Ok(self.users.lock().unwrap().get(id.as_str()).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DirectoryError> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// Plaintext passwords keyed by identity id.
#[derive(Default)]
pub struct PlaintextVerifier {
    passwords: Mutex<HashMap<String, String>>,
}

impl PlaintextVerifier {
    pub fn set(&self, id: &str, password: &str) {
        self.passwords
            .lock()
            .unwrap()
            .insert(id.to_string(), password.to_string());
    }
}

impl CredentialVerifier for PlaintextVerifier {
    fn verify(&self, identity: &Identity, password: &str) -> bool {
        self.passwords
            .lock()
            .unwrap()
            .get(identity.id.as_str())
            .is_some_and(|p| p == password)
    }
}

pub struct Harness {
    pub directory: Arc<InMemoryDirectory>,
    pub verifier: Arc<PlaintextVerifier>,
    pub engine: TokenEngine,
    pub flow: AuthenticationFlow,
}

/// Access TTL 1h, refresh TTL 7d; alice (professor) and bob (medical staff).
pub fn harness() -> Harness {
    let directory = Arc::new(InMemoryDirectory::default());
    let verifier = Arc::new(PlaintextVerifier::default());

    directory.insert(identity("1000100100", "alice@example.com", Role::Professor, None));
    verifier.set("1000100100", "correct horse");
    directory.insert(identity(
        "2000200200",
        "bob@example.com",
        Role::MedicalStaff,
        Some(Specialty::GeneralMedicine),
    ));
    verifier.set("2000200200", "battery staple");

    let config = TokenConfig::new(SECRET)
        .with_access_ttl(Duration::hours(1))
        .with_refresh_ttl(Duration::days(7));
    let engine = TokenEngine::from_config(&config).unwrap();

    let flow = AuthenticationFlow::new(
        directory.clone(),
        verifier.clone(),
        engine.issuer.clone(),
        engine.validator.clone(),
    );

    Harness {
        directory,
        verifier,
        engine,
        flow,
    }
}
