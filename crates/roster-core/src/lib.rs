//! Reactive data layer and panel logic between `roster-api` and the TUI.
//!
//! This crate owns the business logic of the user-management panel:
//!
//! - **[`UserForm`]** — the creation-form controller. Holds the in-progress
//!   [`DraftUser`], runs the ordered validation gate on
//!   [`submit()`](panel::UserForm::submit), and delegates persistence to the
//!   abstract [`UserDirectory`]. Success resets the draft and requests both
//!   dependent views to refetch; failure preserves the draft for retry.
//!
//! - **[`UserList`]** — the listing coordinator. Owns no data of its own:
//!   deletion runs through an injected [`ConfirmGate`], then the directory,
//!   then the same two refresh requests.
//!
//! - **[`DataStore`]** — reactive storage for the users collection, the
//!   analytics summary, and the externally driven loading flag
//!   (`DashMap` + `tokio::sync::watch` snapshots).
//!
//! - **Refresh worker** ([`spawn_refresh_worker`]) — the sole fetcher.
//!   Panel controllers never await a refetch; they drop a
//!   [`RefreshRequest`] on the worker's channel and move on. Completion
//!   order relative to any notification already shown is unspecified.
//!
//! - **[`Notifier`]** — fire-and-forget toast sink shared by both
//!   controllers. Validation failures are notified and never logged;
//!   service failures are notified and logged.

pub mod config;
pub mod confirm;
pub mod convert;
pub mod directory;
pub mod error;
pub mod model;
pub mod notify;
pub mod panel;
pub mod refresh;
pub mod store;
pub mod stream;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use roster_api::DirectoryClient;
pub use roster_api::transport::TlsMode;

pub use config::ServiceConfig;
pub use confirm::ConfirmGate;
pub use directory::UserDirectory;
pub use error::ServiceError;
pub use notify::{Notification, NotificationLevel, Notifier};
pub use panel::{DeleteOutcome, SubmitOutcome, UserForm, UserList};
pub use refresh::{RefreshHandle, RefreshRequest, spawn_refresh_worker};
pub use store::DataStore;
pub use stream::UserStream;
pub use validate::{ValidationError, validate_draft};

// Re-export model types at the crate root for ergonomics.
pub use model::{AnalyticsSummary, DraftUser, FieldPatch, Gender, Role, User, UserId};
