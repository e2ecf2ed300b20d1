// ── Reactive users stream ──
//
// Subscription handle for consuming users-collection changes from the
// DataStore.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::User;

/// A subscription to the users collection.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via [`changed()`](Self::changed).
pub struct UserStream {
    current: Arc<Vec<Arc<User>>>,
    receiver: watch::Receiver<Arc<Vec<Arc<User>>>>,
}

impl UserStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<Vec<Arc<User>>>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation time (or the last `changed()`).
    pub fn current(&self) -> &Arc<Vec<Arc<User>>> {
        &self.current
    }

    /// Get the latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Arc<Vec<Arc<User>>> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` if the sender (DataStore) has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Vec<Arc<User>>>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }
}
