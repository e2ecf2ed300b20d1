//! Dialog-backed implementation of the core's confirmation capability.
//!
//! `confirm()` posts a [`ConfirmRequest`] into the action loop and awaits
//! the one-shot answer the app sends when the operator presses y or n.
//! If the UI is gone before an answer arrives, the decision is `false` —
//! an unanswerable prompt never proceeds.

use std::future::Future;

use tokio::sync::{mpsc, oneshot};

use roster_core::ConfirmGate;

use crate::action::{Action, ConfirmRequest};

/// Confirmation gate wired into the TUI's action channel.
#[derive(Debug, Clone)]
pub struct DialogGate {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl DialogGate {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }
}

impl ConfirmGate for DialogGate {
    fn confirm(&self, prompt: &str) -> impl Future<Output = bool> + Send {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = ConfirmRequest::new(prompt, reply_tx);
        let sent = self.action_tx.send(Action::ShowConfirm(request)).is_ok();

        async move {
            if !sent {
                return false;
            }
            reply_rx.await.unwrap_or(false)
        }
    }
}
