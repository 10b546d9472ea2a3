// Key-value store for cached page content.
// File-backed for real runs, in-memory for tests; both share the LocalStore contract.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{AppError, Result};

use super::paths;

/// Logical key under which the last fetched page is stored.
pub const CONTENT_KEY: &str = "web_content";

/// Synchronous string key-value store.
///
/// `get` returns an empty string for an absent key. Reads and writes are
/// atomic per key; nothing locks across calls.
pub trait LocalStore: Send + Sync {
    /// The value under `key` together with when it was written.
    fn entry(&self, key: &str) -> Result<Option<CachedData<String>>>;

    fn put(&self, key: &str, value: &str) -> Result<()>;

    fn get(&self, key: &str) -> Result<String> {
        Ok(self
            .entry(key)?
            .map(|cached| cached.data)
            .unwrap_or_default())
    }
}

/// Wrapper for a stored value with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }
}

/// Store persisting each key as a JSON file under a base directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Open the store in the platform cache directory.
    pub fn open_default() -> Result<Self> {
        paths::cache_dir().map(Self::new).ok_or(AppError::NoCacheDir)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

}

impl LocalStore for FileStore {
    fn entry(&self, key: &str) -> Result<Option<CachedData<String>>> {
        let path = paths::key_path(&self.base, key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let cached = serde_json::from_str(&contents)?;
        Ok(Some(cached))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let cached = CachedData::new(value);
        let json = serde_json::to_string_pretty(&cached)?;
        write_atomic(&paths::key_path(&self.base, key), json.as_bytes())
    }
}

/// Write bytes to `path` via a synced temp file and rename.
///
/// Each call gets its own uniquely named temp file in the target directory,
/// so concurrent writers never share one and the last rename wins.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| AppError::Other(format!("No parent directory for {}", path.display())))?;
    fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Process-local store, used in tests and when no cache dir exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, CachedData<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `value` under `key`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.lock().insert(key.to_string(), CachedData::new(value.to_string()));
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CachedData<String>>> {
        // A poisoned map still holds whole values, so keep using it.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LocalStore for MemoryStore {
    fn entry(&self, key: &str) -> Result<Option<CachedData<String>>> {
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.lock()
            .insert(key.to_string(), CachedData::new(value.to_string()));
        Ok(())
    }
}
