//! Durable key-value storage backends.
//!
//! The identifier cache persists through this small capability instead of
//! ambient global state, so tests can swap in [`MemoryStore`] and inspect
//! exactly what was written.

use crate::error::AuditError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use verdict_core::CacheConfig;

/// Trait for durable key-value backends.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, AuditError>;

    /// Replace the value under `key` in a single write.
    fn set(&self, key: &str, value: &str) -> Result<(), AuditError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), AuditError>;
}

/// Create a storage backend based on configuration.
pub fn create_store(config: &CacheConfig) -> Result<Arc<dyn KeyValueStore>, AuditError> {
    match &config.directory {
        Some(directory) => Ok(Arc::new(FileStore::new(directory)?)),
        None => Ok(Arc::new(MemoryStore::new())),
    }
}

/// In-memory storage (lost on drop).
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AuditError> {
        let values = self.values.read().map_err(|e| {
            AuditError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuditError> {
        let mut values = self.values.write().map_err(|e| {
            AuditError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuditError> {
        let mut values = self.values.write().map_err(|e| {
            AuditError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        values.remove(key);
        Ok(())
    }
}

/// File storage: one file per key inside a directory.
///
/// `set` writes a temporary sibling and renames it over the target, so a
/// reader sees either the old value or the new one, never a torn write.
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Create a file store, creating the directory if it doesn't exist.
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, AuditError> {
        let directory = directory.as_ref().to_path_buf();
        if !directory.exists() {
            fs::create_dir_all(&directory)?;
        }
        Ok(Self { directory })
    }

    /// Get the directory path.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file backing `key`.
    fn path_for(&self, key: &str) -> PathBuf {
        self.directory
            .join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AuditError> {
        match fs::read(self.path_for(key)) {
            // Invalid UTF-8 is surfaced as an unparseable value, not an IO error
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuditError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuditError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
