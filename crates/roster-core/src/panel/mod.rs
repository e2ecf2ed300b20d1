//! Panel controllers — the creation form and the listing coordinator.
//!
//! Both flows share one state machine: Idle → Validating → Submitting →
//! {Success, Failure} → Idle. Validating is synchronous and side-effect
//! free apart from a notification on failure; Submitting is the only
//! point where an external await occurs. Neither controller guards
//! against concurrent re-entry — the UI disables its inputs while the
//! externally driven loading flag is set.

mod form;
mod list;

pub use form::{SubmitOutcome, UserForm};
pub use list::{DeleteOutcome, UserList};
