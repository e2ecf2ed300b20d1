// ── Listing coordinator ──

use std::sync::Arc;

use tracing::error;

use crate::confirm::ConfirmGate;
use crate::directory::UserDirectory;
use crate::model::UserId;
use crate::notify::Notifier;
use crate::refresh::RefreshHandle;

const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

/// What a [`UserList::delete_user`] call amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The gate declined; nothing happened.
    Declined,
    /// The service removed the user; both views were asked to refetch.
    Deleted,
    /// The service refused or was unreachable; the listing stays stale
    /// until the next refresh.
    Failed,
}

/// Coordinator for the users listing.
///
/// Holds no collection state — the listing itself lives in the
/// [`DataStore`](crate::store::DataStore) and is only ever replaced by
/// the refresh worker. This type just dispatches deletions and refresh
/// requests over externally owned effects.
#[derive(Clone)]
pub struct UserList<D, G> {
    inner: Arc<ListInner<D, G>>,
}

struct ListInner<D, G> {
    directory: D,
    gate: G,
    refresh: RefreshHandle,
    notifier: Notifier,
}

impl<D: UserDirectory, G: ConfirmGate> UserList<D, G> {
    pub fn new(directory: D, gate: G, refresh: RefreshHandle, notifier: Notifier) -> Self {
        Self {
            inner: Arc::new(ListInner {
                directory,
                gate,
                refresh,
                notifier,
            }),
        }
    }

    /// Delete a user after confirmation.
    ///
    /// A declined gate aborts with zero side effects. On a service
    /// failure only a generic message is shown — the underlying detail
    /// goes to the diagnostic log, not the toast.
    pub async fn delete_user(&self, id: &UserId) -> DeleteOutcome {
        if !self.inner.gate.confirm(DELETE_PROMPT).await {
            return DeleteOutcome::Declined;
        }

        match self.inner.directory.delete_user(id).await {
            Ok(()) => {
                self.inner.refresh.request_users();
                self.inner.refresh.request_analytics();
                self.inner.notifier.success("User deleted successfully!");
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(user = %id, error = %e, "deleting user failed");
                self.inner.notifier.error("Error deleting user");
                DeleteOutcome::Failed
            }
        }
    }

    /// Request a refetch of the users collection. Direct passthrough,
    /// no gating, no deduplication.
    pub fn refresh(&self) {
        self.inner.refresh.request_users();
    }
}
