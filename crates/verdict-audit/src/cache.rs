//! Recent audit identifier cache.
//!
//! Keeps the identifiers of recent decisions as one JSON array of unique
//! strings under a single key, newest first, bounded to `capacity` entries.
//!
//! Stored order is display order: element 0 is the most recent decision and
//! callers render the list as returned, without reversing it.
//!
//! A persisted value that cannot be parsed is discarded on read and the cache
//! behaves as empty. The corruption is logged, never returned.

use crate::error::AuditError;
use crate::storage::KeyValueStore;
use std::collections::HashSet;
use std::sync::Arc;
use verdict_core::{AuditIdentifier, CacheConfig};

/// Default storage key, shared with earlier clients.
pub const DEFAULT_KEY: &str = "audit_ids";

/// Default maximum number of identifiers.
pub const DEFAULT_CAPACITY: usize = 20;

/// Bounded, deduplicated index of recent audit identifiers.
pub struct AuditIdCache {
    store: Arc<dyn KeyValueStore>,
    key: String,
    capacity: usize,
}

impl AuditIdCache {
    /// Create a cache with the default key and capacity.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: DEFAULT_KEY.to_string(),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Create a cache from configuration.
    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &CacheConfig) -> Self {
        Self {
            store,
            key: config.key.clone(),
            capacity: config.capacity.max(1),
        }
    }

    /// Storage key of the index.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current identifiers, most recent first.
    ///
    /// A missing value yields an empty list. An unparseable value is removed
    /// from storage (best effort) and also yields an empty list. Only read
    /// failures (IO, lock poisoning) are returned as errors.
    pub fn list(&self) -> Result<Vec<String>, AuditError> {
        match self.read_index() {
            Ok(ids) => Ok(ids),
            Err(AuditError::StorageCorruption(reason)) => {
                tracing::warn!(
                    key = %self.key,
                    reason = %reason,
                    "Discarding corrupted audit id index"
                );
                if let Err(e) = self.store.remove(&self.key) {
                    tracing::warn!(
                        key = %self.key,
                        error = %e,
                        "Failed to remove corrupted audit id index"
                    );
                }
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Current identifiers parsed into [`AuditIdentifier`]s, most recent first.
    ///
    /// Lets a UI mark hash-fallback entries that the audit store may not resolve.
    pub fn identifiers(&self) -> Result<Vec<AuditIdentifier>, AuditError> {
        Ok(self
            .list()?
            .iter()
            .filter_map(|id| AuditIdentifier::parse(id))
            .collect())
    }

    /// Move `id` to the front, drop older duplicates, truncate, and persist.
    ///
    /// Returns the index as written.
    pub fn insert(&self, id: &str) -> Result<Vec<String>, AuditError> {
        if id.trim().is_empty() {
            return Err(AuditError::Usage(
                "cannot cache an empty audit identifier".to_string(),
            ));
        }

        let mut ids = self.list()?;
        ids.retain(|existing| existing != id);
        ids.insert(0, id.to_string());
        ids.truncate(self.capacity);

        let serialized = serde_json::to_string(&ids)?;
        self.store.set(&self.key, &serialized)?;

        tracing::debug!(key = %self.key, id = %id, entries = ids.len(), "Cached audit id");
        Ok(ids)
    }

    /// Remove the persisted index entirely.
    pub fn clear(&self) -> Result<(), AuditError> {
        self.store.remove(&self.key)?;
        tracing::info!(key = %self.key, "Cleared audit id index");
        Ok(())
    }

    /// Read and parse the persisted index.
    ///
    /// Anything but a JSON array of strings is `StorageCorruption`. A parsed
    /// array is normalized (deduplicated, bounded) without being rewritten.
    fn read_index(&self) -> Result<Vec<String>, AuditError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        let parsed: Vec<String> = serde_json::from_str(&raw)
            .map_err(|e| AuditError::StorageCorruption(e.to_string()))?;

        let mut seen = HashSet::new();
        let mut ids: Vec<String> = parsed
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        ids.truncate(self.capacity);
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    /// Holds a fixed value and refuses every write or removal.
    struct StuckStore {
        value: String,
    }

    impl KeyValueStore for StuckStore {
        fn get(&self, _key: &str) -> Result<Option<String>, AuditError> {
            Ok(Some(self.value.clone()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), AuditError> {
            Err(AuditError::Storage("read-only".to_string()))
        }
        fn remove(&self, _key: &str) -> Result<(), AuditError> {
            Err(AuditError::Storage("read-only".to_string()))
        }
    }

    #[test]
    fn test_corruption_is_not_surfaced_when_removal_fails() {
        let cache = AuditIdCache::new(Arc::new(StuckStore {
            value: "{not json".to_string(),
        }));
        assert!(cache.list().unwrap().is_empty());
        assert!(cache.identifiers().unwrap().is_empty());
    }

    fn memory_cache() -> (Arc<MemoryStore>, AuditIdCache) {
        let store = Arc::new(MemoryStore::new());
        let cache = AuditIdCache::new(store.clone());
        (store, cache)
    }

    #[test]
    fn test_empty_when_missing() {
        let (store, cache) = memory_cache();
        assert!(cache.list().unwrap().is_empty());
        // Reading never creates the value
        assert_eq!(store.get(DEFAULT_KEY).unwrap(), None);
    }

    #[test]
    fn test_insert_places_newest_first() {
        let (store, cache) = memory_cache();
        cache.insert("r1").unwrap();
        cache.insert("r2").unwrap();
        cache.insert("hash:abc").unwrap();

        assert_eq!(cache.list().unwrap(), vec!["hash:abc", "r2", "r1"]);
        assert_eq!(
            store.get(DEFAULT_KEY).unwrap().as_deref(),
            Some(r#"["hash:abc","r2","r1"]"#)
        );
    }

    #[test]
    fn test_reinsert_moves_to_front_once() {
        let (_store, cache) = memory_cache();
        cache.insert("r1").unwrap();
        cache.insert("r2").unwrap();
        cache.insert("r3").unwrap();

        let ids = cache.insert("r1").unwrap();
        assert_eq!(ids, vec!["r1", "r3", "r2"]);
        assert_eq!(ids.iter().filter(|id| *id == "r1").count(), 1);

        let ids = cache.insert("r1").unwrap();
        assert_eq!(ids, vec!["r1", "r3", "r2"]);
    }

    #[test]
    fn test_bounded_to_capacity() {
        let (_store, cache) = memory_cache();
        for i in 0..45 {
            let ids = cache.insert(&format!("req-{}", i % 30)).unwrap();
            assert!(ids.len() <= DEFAULT_CAPACITY);
            let unique: HashSet<_> = ids.iter().collect();
            assert_eq!(unique.len(), ids.len());
            assert_eq!(ids[0], format!("req-{}", i % 30));
        }

        let ids = cache.list().unwrap();
        assert_eq!(ids.len(), DEFAULT_CAPACITY);
        assert_eq!(ids[0], "req-14");
        assert_eq!(ids[19], "req-25");
    }

    #[test]
    fn test_custom_capacity_and_key() {
        let store = Arc::new(MemoryStore::new());
        let config = CacheConfig {
            key: "recent".to_string(),
            capacity: 2,
            directory: None,
        };
        let cache = AuditIdCache::from_config(store.clone(), &config);
        cache.insert("a").unwrap();
        cache.insert("b").unwrap();
        cache.insert("c").unwrap();

        assert_eq!(cache.list().unwrap(), vec!["c", "b"]);
        assert!(store.get("recent").unwrap().is_some());
        assert_eq!(store.get(DEFAULT_KEY).unwrap(), None);
    }

    #[test]
    fn test_corrupted_value_is_discarded() {
        let (store, cache) = memory_cache();
        store.set(DEFAULT_KEY, "{not json").unwrap();

        assert!(cache.list().unwrap().is_empty());
        // Cleared, not merely masked
        assert_eq!(store.get(DEFAULT_KEY).unwrap(), None);
        assert!(cache.list().unwrap().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_corruption() {
        let (store, cache) = memory_cache();

        for bad in [r#"{"ids": ["r1"]}"#, "null", "42", r#"["r1", 7]"#] {
            store.set(DEFAULT_KEY, bad).unwrap();
            assert!(cache.list().unwrap().is_empty(), "value {} should reset", bad);
            assert_eq!(store.get(DEFAULT_KEY).unwrap(), None);
        }
    }

    #[test]
    fn test_insert_after_corruption_starts_fresh() {
        let (store, cache) = memory_cache();
        store.set(DEFAULT_KEY, "garbage").unwrap();

        assert_eq!(cache.insert("r9").unwrap(), vec!["r9"]);
        assert_eq!(store.get(DEFAULT_KEY).unwrap().as_deref(), Some(r#"["r9"]"#));
    }

    #[test]
    fn test_legacy_value_is_normalized_on_read() {
        let (store, cache) = memory_cache();
        let oversized: Vec<String> = (0..25).map(|i| format!("r{}", i)).collect();
        let mut with_dupes = vec!["r0".to_string()];
        with_dupes.extend(oversized);
        store
            .set(DEFAULT_KEY, &serde_json::to_string(&with_dupes).unwrap())
            .unwrap();

        let ids = cache.list().unwrap();
        assert_eq!(ids.len(), DEFAULT_CAPACITY);
        assert_eq!(ids[0], "r0");
        assert_eq!(ids[1], "r1");
    }

    #[test]
    fn test_clear() {
        let (store, cache) = memory_cache();
        cache.insert("r1").unwrap();
        cache.clear().unwrap();

        assert_eq!(store.get(DEFAULT_KEY).unwrap(), None);
        assert!(cache.list().unwrap().is_empty());
        // Clearing an empty cache is fine
        cache.clear().unwrap();
    }

    #[test]
    fn test_empty_id_rejected() {
        let (store, cache) = memory_cache();
        assert!(matches!(cache.insert("  "), Err(AuditError::Usage(_))));
        assert_eq!(store.get(DEFAULT_KEY).unwrap(), None);
    }

    #[test]
    fn test_identifiers() {
        let (_store, cache) = memory_cache();
        cache.insert("r1").unwrap();
        cache.insert("hash:beef").unwrap();

        let ids = cache.identifiers().unwrap();
        assert_eq!(ids.len(), 2);
        assert!(!ids[0].is_resolvable_by_id());
        assert!(ids[1].is_resolvable_by_id());
    }

    #[test]
    fn test_file_backed_corruption_recovery() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FileStore::new(temp_dir.path()).unwrap());
        let cache = AuditIdCache::new(store.clone());

        cache.insert("r1").unwrap();
        std::fs::write(temp_dir.path().join("audit_ids.json"), [0xff, 0xfe, 0x00]).unwrap();

        assert!(cache.list().unwrap().is_empty());
        assert!(!temp_dir.path().join("audit_ids.json").exists());

        // Survives a "restart"
        cache.insert("r2").unwrap();
        let reopened = AuditIdCache::new(Arc::new(FileStore::new(temp_dir.path()).unwrap()));
        assert_eq!(reopened.list().unwrap(), vec!["r2"]);
    }
}
