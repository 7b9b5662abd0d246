use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory per-universe API key cache.
///
/// Keys live for the lifetime of the process and are never persisted.
/// Cloned handles share one map, so the store is carried inside the
/// framework data and can be swapped for a prefilled one in tests.
/// Updates are rare administrative actions; a plain `RwLock` around the
/// whole map is all the synchronization this needs.
#[derive(Clone, Debug, Default)]
pub struct KeyStore {
    inner: Arc<RwLock<HashMap<u64, String>>>,
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, universe_id: u64) -> Option<String> {
        self.read().get(&universe_id).cloned()
    }

    pub fn set(&self, universe_id: u64, api_key: impl Into<String>) {
        self.write().insert(universe_id, api_key.into());
    }

    pub fn has(&self, universe_id: u64) -> bool {
        self.read().contains_key(&universe_id)
    }

    /// Drop the key for a universe; returns whether one was cached.
    pub fn clear(&self, universe_id: u64) -> bool {
        self.write().remove(&universe_id).is_some()
    }

    /// Universes with a cached key, sorted for stable display.
    pub fn universe_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<u64, String>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<u64, String>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::KeyStore;

    #[test]
    fn stores_and_clears_keys_per_universe() {
        let keys = KeyStore::new();
        assert!(!keys.has(42));
        assert_eq!(keys.get(42), None);

        keys.set(42, "secret-a");
        keys.set(7, "secret-b");
        assert!(keys.has(42));
        assert_eq!(keys.get(42).as_deref(), Some("secret-a"));
        assert_eq!(keys.universe_ids(), vec![7, 42]);

        keys.set(42, "rotated");
        assert_eq!(keys.get(42).as_deref(), Some("rotated"));

        assert!(keys.clear(42));
        assert!(!keys.clear(42));
        assert_eq!(keys.get(42), None);
    }

    #[test]
    fn clones_share_one_map() {
        let keys = KeyStore::new();
        let handle = keys.clone();

        handle.set(1, "shared");
        assert_eq!(keys.get(1).as_deref(), Some("shared"));
    }
}
