//! Identities as seen by the token service.
//!
//! The directory owns these records; the token engine only reads them.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{DomainError, IdentityId};

// ─────────────────────────────────────────────────────────────────────────────
// Role
// ─────────────────────────────────────────────────────────────────────────────

/// Role of an identity within the wellness system.
///
/// The wire name (`as_str`) is what lands in the `roles` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Professor,
    Administrator,
    MedicalStaff,
    Trainer,
    WellnessStaff,
    Monitor,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Student,
        Role::Professor,
        Role::Administrator,
        Role::MedicalStaff,
        Role::Trainer,
        Role::WellnessStaff,
        Role::Monitor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Professor => "PROFESSOR",
            Role::Administrator => "ADMINISTRATOR",
            Role::MedicalStaff => "MEDICAL_STAFF",
            Role::Trainer => "TRAINER",
            Role::WellnessStaff => "WELLNESS_STAFF",
            Role::Monitor => "MONITOR",
        }
    }

    /// Staff roles are the only ones whose tokens may carry a specialty.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::MedicalStaff | Role::Trainer | Role::WellnessStaff)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown role '{s}'")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Specialty
// ─────────────────────────────────────────────────────────────────────────────

/// Professional specialty of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialty {
    GeneralMedicine,
    Dentistry,
    Psychology,
    Physiotherapy,
    Nutrition,
    PhysicalTraining,
}

impl Specialty {
    pub const ALL: [Specialty; 6] = [
        Specialty::GeneralMedicine,
        Specialty::Dentistry,
        Specialty::Psychology,
        Specialty::Physiotherapy,
        Specialty::Nutrition,
        Specialty::PhysicalTraining,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::GeneralMedicine => "GENERAL_MEDICINE",
            Specialty::Dentistry => "DENTISTRY",
            Specialty::Psychology => "PSYCHOLOGY",
            Specialty::Physiotherapy => "PHYSIOTHERAPY",
            Specialty::Nutrition => "NUTRITION",
            Specialty::PhysicalTraining => "PHYSICAL_TRAINING",
        }
    }
}

impl core::fmt::Display for Specialty {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Specialty::ALL
            .into_iter()
            .find(|sp| sp.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown specialty '{s}'")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Identity
// ─────────────────────────────────────────────────────────────────────────────

/// An authenticatable identity, as resolved from the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub specialty: Option<Specialty>,
    pub active: bool,
}

impl Identity {
    /// Specialty to embed in tokens: only staff roles expose one.
    pub fn token_specialty(&self) -> Option<Specialty> {
        if self.role.is_staff() {
            self.specialty
        } else {
            None
        }
    }

    pub fn summary(&self) -> IdentitySummary {
        IdentitySummary {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Public fields of an identity, echoed back to callers after authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySummary {
    pub id: IdentityId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}
