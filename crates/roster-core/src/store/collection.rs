// ── Generic reactive keyed collection ──
//
// Lock-free concurrent storage with O(1) lookups and push-based
// change notification via `watch` channels.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

/// A reactive collection for a single entity type, keyed by identifier.
///
/// Every mutation bumps a version counter and rebuilds the snapshot that
/// subscribers receive. The snapshot is ordered by key so a listing stays
/// stable across refreshes (service identifiers are time-ordered).
pub(crate) struct EntityCollection<K, T>
where
    K: Clone + Ord + Hash + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    by_id: DashMap<K, Arc<T>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<K, T> EntityCollection<K, T>
where
    K: Clone + Ord + Hash + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Insert or update an entity. Returns `true` if the key was new.
    pub(crate) fn upsert(&self, key: K, entity: T) -> bool {
        let is_new = self.by_id.insert(key, Arc::new(entity)).is_none();
        self.rebuild_snapshot();
        self.bump_version();
        is_new
    }

    /// Remove an entity by key. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, key: &K) -> Option<Arc<T>> {
        let removed = self.by_id.remove(key).map(|(_, v)| v);
        if removed.is_some() {
            self.rebuild_snapshot();
            self.bump_version();
        }
        removed
    }

    /// Look up an entity by key.
    pub(crate) fn get(&self, key: &K) -> Option<Arc<T>> {
        self.by_id.get(key).map(|r| Arc::clone(r.value()))
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Return all current keys in the collection.
    pub(crate) fn keys(&self) -> Vec<K> {
        self.by_id.iter().map(|r| r.key().clone()).collect()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Collect all values, sorted by key, and broadcast to subscribers.
    fn rebuild_snapshot(&self) {
        let mut entries: Vec<(K, Arc<T>)> = self
            .by_id
            .iter()
            .map(|r| (r.key().clone(), Arc::clone(r.value())))
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        let values: Vec<Arc<T>> = entries.into_iter().map(|(_, v)| v).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    /// Increment the version counter.
    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn upsert_returns_true_for_new_key() {
        let col: EntityCollection<String, String> = EntityCollection::new();
        assert!(col.upsert("k1".into(), "hello".into()));
    }

    #[test]
    fn upsert_returns_false_for_existing_key() {
        let col: EntityCollection<String, String> = EntityCollection::new();
        col.upsert("k1".into(), "hello".into());
        assert!(!col.upsert("k1".into(), "world".into()));
        assert_eq!(*col.get(&"k1".to_string()).unwrap(), "world");
    }

    #[test]
    fn remove_drops_the_entity() {
        let col: EntityCollection<String, String> = EntityCollection::new();
        col.upsert("k1".into(), "hello".into());

        let removed = col.remove(&"k1".to_string());
        assert_eq!(*removed.unwrap(), "hello");
        assert!(col.get(&"k1".to_string()).is_none());
        assert_eq!(col.len(), 0);
    }

    #[test]
    fn snapshot_is_ordered_by_key() {
        let col: EntityCollection<String, String> = EntityCollection::new();
        col.upsert("b".into(), "second".into());
        col.upsert("a".into(), "first".into());
        col.upsert("c".into(), "third".into());

        let snap = col.snapshot();
        let values: Vec<&str> = snap.iter().map(|v| v.as_str()).collect();
        assert_eq!(values, ["first", "second", "third"]);
    }

    #[test]
    fn subscribers_see_mutations() {
        let col: EntityCollection<String, String> = EntityCollection::new();
        let rx = col.subscribe();
        assert!(rx.borrow().is_empty());

        col.upsert("a".into(), "x".into());
        assert_eq!(rx.borrow().len(), 1);
    }
}
