//! Refresh protocol — the only path by which the panel's views change.
//!
//! Mutating flows never await a refetch. They drop a [`RefreshRequest`]
//! on the worker's channel and move on; the worker fetches and writes
//! the [`DataStore`] on its own schedule. There is no ordering guarantee
//! between the two views' completions, nor between either completion and
//! any notification already shown — a success toast means the mutating
//! call succeeded, not that the listing has caught up.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::directory::UserDirectory;
use crate::store::DataStore;

/// A named external view to refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshRequest {
    Users,
    Analytics,
}

/// Fire-and-forget handle for requesting refetches.
///
/// Sends are infallible from the caller's perspective: once the worker
/// is gone (shutdown), requests are silently dropped.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    tx: mpsc::UnboundedSender<RefreshRequest>,
}

impl RefreshHandle {
    /// Create a handle plus the receiving end a worker drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RefreshRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Request a refetch of the users collection. Never deduplicated:
    /// every call issues one fetch.
    pub fn request_users(&self) {
        let _ = self.tx.send(RefreshRequest::Users);
    }

    /// Request a refetch of the analytics view.
    pub fn request_analytics(&self) {
        let _ = self.tx.send(RefreshRequest::Analytics);
    }
}

/// Spawn the background refresh worker.
///
/// Performs an initial fetch of both views, then serves requests until
/// cancelled. When `interval_secs > 0` both views are additionally
/// refetched on that period. The users fetch drives the store's loading
/// flag; the panel controllers never touch it.
pub fn spawn_refresh_worker<D: UserDirectory>(
    directory: D,
    store: Arc<DataStore>,
    interval_secs: u64,
    cancel: CancellationToken,
) -> (RefreshHandle, JoinHandle<()>) {
    let (handle, rx) = RefreshHandle::channel();
    let task = tokio::spawn(refresh_worker(directory, store, rx, interval_secs, cancel));
    (handle, task)
}

async fn refresh_worker<D: UserDirectory>(
    directory: D,
    store: Arc<DataStore>,
    mut rx: mpsc::UnboundedReceiver<RefreshRequest>,
    interval_secs: u64,
    cancel: CancellationToken,
) {
    // Initial load so the panel has data before the first user action.
    refresh_users(&directory, &store).await;
    refresh_analytics(&directory, &store).await;

    let mut ticker = (interval_secs > 0).then(|| {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick of a fresh interval fires immediately; the
        // initial load above already covered it.
        interval.reset();
        interval
    });

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(request) = rx.recv() => match request {
                RefreshRequest::Users => refresh_users(&directory, &store).await,
                RefreshRequest::Analytics => refresh_analytics(&directory, &store).await,
            },

            () = periodic_tick(ticker.as_mut()) => {
                refresh_users(&directory, &store).await;
                refresh_analytics(&directory, &store).await;
            }
        }
    }

    debug!("refresh worker shut down");
}

async fn periodic_tick(ticker: Option<&mut tokio::time::Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn refresh_users<D: UserDirectory>(directory: &D, store: &DataStore) {
    store.set_loading(true);
    match directory.list_users().await {
        Ok(users) => {
            debug!(count = users.len(), "users refreshed");
            store.apply_users(users);
        }
        Err(e) => {
            // Keep the previous snapshot; the listing stays stale until
            // the next request succeeds.
            warn!(error = %e, "users refresh failed");
        }
    }
    store.set_loading(false);
}

async fn refresh_analytics<D: UserDirectory>(directory: &D, store: &DataStore) {
    match directory.fetch_analytics().await {
        Ok(summary) => store.apply_analytics(summary),
        Err(e) => {
            warn!(error = %e, "analytics refresh failed");
        }
    }
}
