//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use roster_core::{AnalyticsSummary, Notification, User, UserId};

use crate::screen::ScreenId;

/// A confirmation dialog request with its one-shot answer slot.
///
/// The slot sits behind a mutex so the action stays cloneable; whichever
/// clone answers first wins, the rest become no-ops. Dropping every clone
/// unanswered resolves the asker to `false`.
#[derive(Debug, Clone)]
pub struct ConfirmRequest {
    pub prompt: String,
    reply: Arc<Mutex<Option<oneshot::Sender<bool>>>>,
}

impl ConfirmRequest {
    pub fn new(prompt: impl Into<String>, reply: oneshot::Sender<bool>) -> Self {
        Self {
            prompt: prompt.into(),
            reply: Arc::new(Mutex::new(Some(reply))),
        }
    }

    /// Deliver the decision to the asker.
    pub fn answer(&self, decision: bool) {
        if let Some(tx) = self.reply.lock().expect("confirm reply lock").take() {
            let _ = tx.send(decision);
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),

    // ── Data Events (from roster-core streams) ────────────────────
    UsersUpdated(Arc<Vec<Arc<User>>>),
    AnalyticsUpdated(Arc<AnalyticsSummary>),
    LoadingChanged(bool),

    // ── Panel Operations ──────────────────────────────────────────
    SubmitForm,
    RequestDeleteUser(UserId),
    RefreshUsers,

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmRequest),
    ConfirmYes,
    ConfirmNo,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
