//! Injected confirmation capability.
//!
//! Deletion is gated behind an explicit decision. Instead of a global
//! blocking dialog, the gate is a capability handed to the
//! [`UserList`](crate::panel::UserList), so the TUI can answer it with a
//! real dialog and tests can answer it with a constant.

use std::future::Future;

/// Answers "should this destructive action proceed?".
pub trait ConfirmGate: Send + Sync {
    /// Present `prompt` and resolve to the decision. A declined or
    /// unanswerable prompt resolves to `false`.
    fn confirm(&self, prompt: &str) -> impl Future<Output = bool> + Send;
}
