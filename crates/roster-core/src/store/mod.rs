// ── Central reactive data store ──
//
// Thread-safe storage for the panel's two externally owned views and
// the loading flag. Mutations are broadcast to subscribers via `watch`
// channels. The store never talks to the network -- the refresh worker
// writes, the UI subscribes.

mod collection;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use self::collection::EntityCollection;

use crate::model::{AnalyticsSummary, User, UserId};
use crate::stream::UserStream;

/// Reactive store for the users collection, analytics summary, and
/// loading flag.
pub struct DataStore {
    users: EntityCollection<UserId, User>,
    analytics: watch::Sender<Arc<AnalyticsSummary>>,
    loading: watch::Sender<bool>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    pub fn new() -> Self {
        let (analytics, _) = watch::channel(Arc::new(AnalyticsSummary::default()));
        let (loading, _) = watch::channel(false);
        let (last_refresh, _) = watch::channel(None);

        Self {
            users: EntityCollection::new(),
            analytics,
            loading,
            last_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn users_snapshot(&self) -> Arc<Vec<Arc<User>>> {
        self.users.snapshot()
    }

    pub fn user_by_id(&self, id: &UserId) -> Option<Arc<User>> {
        self.users.get(id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn analytics_snapshot(&self) -> Arc<AnalyticsSummary> {
        self.analytics.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_users(&self) -> UserStream {
        UserStream::new(self.users.subscribe())
    }

    pub fn subscribe_analytics(&self) -> watch::Receiver<Arc<AnalyticsSummary>> {
        self.analytics.subscribe()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    // ── Mutation (refresh worker only) ───────────────────────────────

    /// Apply a full users refetch.
    ///
    /// Uses upsert-then-prune: incoming users are upserted first, then
    /// any keys absent from the incoming set are removed. This avoids the
    /// brief "empty" state that a clear-then-insert approach would cause.
    pub(crate) fn apply_users(&self, incoming: Vec<User>) {
        let incoming_keys: HashSet<UserId> = incoming.iter().map(|u| u.id.clone()).collect();
        for user in incoming {
            self.users.upsert(user.id.clone(), user);
        }
        for existing in self.users.keys() {
            if !incoming_keys.contains(&existing) {
                self.users.remove(&existing);
            }
        }
        let _ = self.last_refresh.send(Some(Utc::now()));
    }

    pub(crate) fn apply_analytics(&self, summary: AnalyticsSummary) {
        self.analytics.send_modify(|a| *a = Arc::new(summary));
    }

    pub(crate) fn set_loading(&self, value: bool) {
        let _ = self.loading.send(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Role};

    fn user(id: &str, name: &str) -> User {
        User {
            id: UserId::from(id),
            name: name.into(),
            email: format!("{name}@example.io"),
            role: Role::User,
            gender: Gender::Male,
            created_at: None,
        }
    }

    #[test]
    fn apply_users_replaces_the_collection() {
        let store = DataStore::new();
        store.apply_users(vec![user("a", "ann"), user("b", "bo")]);
        assert_eq!(store.user_count(), 2);

        // second refetch drops "a" and adds "c"
        store.apply_users(vec![user("b", "bo"), user("c", "cy")]);
        assert_eq!(store.user_count(), 2);
        assert!(store.user_by_id(&UserId::from("a")).is_none());
        assert!(store.user_by_id(&UserId::from("c")).is_some());
    }

    #[test]
    fn apply_users_stamps_last_refresh() {
        let store = DataStore::new();
        assert!(store.last_refresh().is_none());
        store.apply_users(Vec::new());
        assert!(store.last_refresh().is_some());
    }

    #[test]
    fn loading_flag_round_trips() {
        let store = DataStore::new();
        assert!(!store.is_loading());
        store.set_loading(true);
        assert!(store.is_loading());
    }

    #[test]
    fn analytics_snapshot_updates() {
        let store = DataStore::new();
        store.apply_analytics(AnalyticsSummary {
            total_users: 3,
            admins: 1,
            members: 2,
            male: 2,
            female: 1,
        });
        assert_eq!(store.analytics_snapshot().total_users, 3);
    }
}
