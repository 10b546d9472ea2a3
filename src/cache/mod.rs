// Cache module for local persistence.
// Keeps the last successfully fetched page for offline fallback.

#![allow(dead_code, unused_imports)]

pub mod paths;
pub mod store;

pub use paths::{cache_dir, log_path};
pub use store::{CONTENT_KEY, CachedData, FileStore, LocalStore, MemoryStore};
