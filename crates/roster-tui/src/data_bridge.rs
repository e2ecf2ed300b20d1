//! Data bridge — connects [`DataStore`] streams to TUI actions.
//!
//! Runs as a background task: subscribes to the users collection, the
//! analytics summary, and the loading flag, forwarding every change as
//! an [`Action`] through the TUI's action channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use roster_core::DataStore;

use crate::action::Action;

/// Forward store changes into the action loop until cancelled.
///
/// Pushes initial snapshots first so screens have data immediately.
pub async fn run_data_bridge(
    store: Arc<DataStore>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut users = store.subscribe_users();
    let mut analytics = store.subscribe_analytics();
    let mut loading = store.subscribe_loading();

    let _ = action_tx.send(Action::UsersUpdated(users.current().clone()));
    let _ = action_tx.send(Action::AnalyticsUpdated(analytics.borrow().clone()));
    let _ = action_tx.send(Action::LoadingChanged(*loading.borrow()));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(snapshot) = users.changed() => {
                let _ = action_tx.send(Action::UsersUpdated(snapshot));
            }
            Ok(()) = analytics.changed() => {
                let summary = analytics.borrow_and_update().clone();
                let _ = action_tx.send(Action::AnalyticsUpdated(summary));
            }
            Ok(()) = loading.changed() => {
                let flag = *loading.borrow_and_update();
                let _ = action_tx.send(Action::LoadingChanged(flag));
            }
        }
    }

    debug!("data bridge shut down");
}
