// ── Wire types for the directory service ──
//
// Raw JSON shapes as the service sends them. Role and gender stay
// plain strings here; `roster-core` converts them to domain enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored user as returned by `GET api/users` and `POST api/users`.
///
/// The service is document-store backed, so the identifier arrives as
/// either `id` or `_id` depending on the endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,
    pub email: String,

    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub gender: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST api/users`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserBody {
    pub name: String,
    pub email: String,
    pub role: String,
    pub gender: String,
}

/// Aggregate counts from `GET api/analytics`.
///
/// The report covers more panels than this client ever renders;
/// unknown fields are ignored on purpose.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub admins: u64,
    #[serde(default)]
    pub members: u64,
    #[serde(default)]
    pub male: u64,
    #[serde(default)]
    pub female: u64,
}
