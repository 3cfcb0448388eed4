//! File-seeded user directory.
//!
//! Loaded once from a JSON array of user records; read-only afterwards.
//! Passwords are stored as argon2 PHC strings.

use std::collections::HashMap;
use std::path::Path;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use serde::Deserialize;
use thiserror::Error;

use wellness_core::{
    CredentialVerifier, DirectoryError, Identity, IdentityId, Role, Specialty, UserDirectory,
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read users file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse users file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate user id: {0}")]
    DuplicateId(String),

    #[error("duplicate user email: {0}")]
    DuplicateEmail(String),

    #[error("invalid password hash for user {0}")]
    InvalidHash(String),
}

/// One record of the seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub specialty: Option<Specialty>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub password_hash: String,
}

fn default_active() -> bool {
    true
}

struct Entry {
    identity: Identity,
    password_hash: String,
}

#[derive(Default)]
pub struct SeededDirectory {
    by_id: HashMap<String, Entry>,
    id_by_email: HashMap<String, String>,
}

impl SeededDirectory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        let records: Vec<UserRecord> = serde_json::from_str(raw)?;
        Self::from_records(records)
    }

    /// Ids and emails must be unique; every hash must parse as a PHC string.
    pub fn from_records(records: Vec<UserRecord>) -> Result<Self, SeedError> {
        let mut directory = Self::default();

        for record in records {
            if PasswordHash::new(&record.password_hash).is_err() {
                return Err(SeedError::InvalidHash(record.id));
            }
            if directory.by_id.contains_key(&record.id) {
                return Err(SeedError::DuplicateId(record.id));
            }
            if directory.id_by_email.contains_key(&record.email) {
                return Err(SeedError::DuplicateEmail(record.email));
            }

            directory
                .id_by_email
                .insert(record.email.clone(), record.id.clone());
            directory.by_id.insert(
                record.id.clone(),
                Entry {
                    identity: Identity {
                        id: IdentityId::new(record.id),
                        email: record.email,
                        full_name: record.full_name,
                        role: record.role,
                        specialty: record.specialty,
                        active: record.active,
                    },
                    password_hash: record.password_hash,
                },
            );
        }

        tracing::info!(users = directory.len(), "user directory seeded");
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl UserDirectory for SeededDirectory {
    fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, DirectoryError> {
        Ok(self.by_id.get(id.as_str()).map(|e| e.identity.clone()))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DirectoryError> {
        Ok(self
            .id_by_email
            .get(email)
            .and_then(|id| self.by_id.get(id))
            .map(|e| e.identity.clone()))
    }
}

impl CredentialVerifier for SeededDirectory {
    fn verify(&self, identity: &Identity, password: &str) -> bool {
        let Some(entry) = self.by_id.get(identity.id.as_str()) else {
            return false;
        };
        match PasswordHash::new(&entry.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::test_support::hash;
    use super::*;

    fn seed() -> SeededDirectory {
        let raw = json!([
            {
                "id": "1000100100",
                "email": "alice@example.com",
                "full_name": "Alice Smith",
                "role": "PROFESSOR",
                "password_hash": hash("correct horse"),
            },
            {
                "id": "2000200200",
                "email": "bob@example.com",
                "full_name": "Bob Jones",
                "role": "MEDICAL_STAFF",
                "specialty": "DENTISTRY",
                "active": false,
                "password_hash": hash("battery staple"),
            }
        ]);
        SeededDirectory::from_json(&raw.to_string()).unwrap()
    }

    #[test]
    fn lookups() {
        let dir = seed();
        assert_eq!(dir.len(), 2);

        let alice = dir.find_by_email("alice@example.com").unwrap().unwrap();
        assert_eq!(alice.id.as_str(), "1000100100");
        assert!(alice.active);

        let bob = dir.find_by_id(&IdentityId::new("2000200200")).unwrap().unwrap();
        assert_eq!(bob.specialty, Some(Specialty::Dentistry));
        assert!(!bob.active);

        assert_eq!(dir.find_by_email("ghost@example.com").unwrap(), None);
        assert_eq!(dir.find_by_id(&IdentityId::new("alice@example.com")).unwrap(), None);
    }

    #[test]
    fn verifies_argon2_passwords() {
        let dir = seed();
        let alice = dir.find_by_id(&IdentityId::new("1000100100")).unwrap().unwrap();
        assert!(dir.verify(&alice, "correct horse"));
        assert!(!dir.verify(&alice, "wrongpass"));
    }

    #[test]
    fn rejects_duplicates_and_bad_hashes() {
        let record = |id: &str, email: &str, password_hash: &str| UserRecord {
            id: id.into(),
            email: email.into(),
            full_name: "X".into(),
            role: Role::Student,
            specialty: None,
            active: true,
            password_hash: password_hash.into(),
        };
        let h = hash("pw");

        let err = SeededDirectory::from_records(vec![record("1", "a@x", &h), record("1", "b@x", &h)]);
        assert!(matches!(err, Err(SeedError::DuplicateId(id)) if id == "1"));

        let err = SeededDirectory::from_records(vec![record("1", "a@x", &h), record("2", "a@x", &h)]);
        assert!(matches!(err, Err(SeedError::DuplicateEmail(_))));

        let err = SeededDirectory::from_records(vec![record("1", "a@x", "plaintext")]);
        assert!(matches!(err, Err(SeedError::InvalidHash(_))));
    }

    #[test]
    fn unknown_role_fails_to_parse() {
        let raw = r#"[{"id":"1","email":"a@x","full_name":"A","role":"JANITOR","password_hash":"x"}]"#;
        assert!(matches!(SeededDirectory::from_json(raw), Err(SeedError::Parse(_))));
    }
}
