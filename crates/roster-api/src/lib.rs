//! Async client for the Roster user-directory service.
//!
//! The directory service exposes a small JSON REST surface under `api/`:
//! user listing and mutation plus an aggregate analytics report. This
//! crate is transport only — no validation, no caching, no domain logic.
//! `roster-core` maps the wire types and errors into its own domain.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::DirectoryClient;
pub use error::Error;
pub use models::{AnalyticsReport, CreateUserBody, UserRecord};
pub use transport::TransportConfig;
