//! Canonical domain types for the user-management panel.

mod draft;

pub use draft::{DraftUser, FieldPatch};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Identifiers ─────────────────────────────────────────────────────

/// Opaque service-assigned user identifier.
///
/// The directory service is document-store backed; identifiers are
/// time-ordered strings, which makes lexicographic order a stable
/// insertion order for listings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── Enumerations ────────────────────────────────────────────────────

/// Access role of a user record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// All roles, in selector order.
    pub const ALL: [Role; 2] = [Self::User, Self::Admin];

    /// Human-readable label for UI selectors.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
        }
    }
}

/// Gender of a user record, as modeled by the directory service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// All genders, in selector order.
    pub const ALL: [Gender; 2] = [Self::Male, Self::Female];

    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

// ── Entities ────────────────────────────────────────────────────────

/// A stored user, owned by the remote service.
///
/// The panel only ever reads these; all mutation is indirect — an API
/// call followed by a forced refetch of the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub gender: Gender,
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate counts of the sibling analytics view.
///
/// Opaque to the panel logic — rendered as-is, refetched after every
/// mutation alongside the users collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_users: u64,
    pub admins: u64,
    pub members: u64,
    pub male: u64,
    pub female: u64,
}
