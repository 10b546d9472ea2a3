// Content provider.
// Prefers a fresh fetch, persists it, and falls back to the cached copy on failure.

#![allow(dead_code)]

use chrono::{DateTime, Utc};

use crate::cache::{CONTENT_KEY, LocalStore};
use crate::error::Result;
use crate::remote::RemoteSource;

/// Where a piece of content came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentOrigin {
    /// Fetched just now and written to the store.
    Fresh,
    /// Fetch failed; served from the store.
    Cached { cached_at: Option<DateTime<Utc>> },
    /// Fetch failed and the store had nothing.
    Empty,
}

impl ContentOrigin {
    pub fn is_fresh(&self) -> bool {
        matches!(self, ContentOrigin::Fresh)
    }
}

/// Page body plus its origin.
#[derive(Debug, Clone)]
pub struct Content {
    pub body: String,
    pub origin: ContentOrigin,
}

pub struct ContentProvider<R, S> {
    remote: R,
    store: S,
}

impl<R: RemoteSource, S: LocalStore> ContentProvider<R, S> {
    pub fn new(remote: R, store: S) -> Self {
        Self { remote, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch, falling back to the cached copy. Only store failures are errors.
    pub async fn get_content(&self) -> Result<String> {
        self.fetch_content().await.map(|content| content.body)
    }

    /// Same policy as [`get_content`](Self::get_content), also reporting the origin.
    pub async fn fetch_content(&self) -> Result<Content> {
        match self.remote.fetch().await {
            Ok(body) => {
                self.store.put(CONTENT_KEY, &body)?;
                tracing::info!(bytes = body.len(), "fetched fresh content");
                Ok(Content {
                    body,
                    origin: ContentOrigin::Fresh,
                })
            }
            Err(err) => {
                // One read, so the body and its timestamp come from the same write.
                let (body, origin) = match self.store.entry(CONTENT_KEY)? {
                    Some(cached) if !cached.data.is_empty() => (
                        cached.data,
                        ContentOrigin::Cached {
                            cached_at: Some(cached.cached_at),
                        },
                    ),
                    _ => (String::new(), ContentOrigin::Empty),
                };
                tracing::warn!(reason = %err.reason, ?origin, "fetch failed, using cache");
                Ok(Content { body, origin })
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cache::{FileStore, MemoryStore};
    use crate::error::FetchFailed;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Remote that always answers the same way and counts calls.
    pub(crate) struct StubRemote {
        response: std::result::Result<String, FetchFailed>,
        calls: AtomicUsize,
    }

    impl StubRemote {
        pub(crate) fn ok(body: &str) -> Self {
            Self {
                response: Ok(body.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                response: Err(FetchFailed::new("connection refused")),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RemoteSource for StubRemote {
        async fn fetch(&self) -> std::result::Result<String, FetchFailed> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn test_success_returns_and_caches() {
        let provider = ContentProvider::new(StubRemote::ok("fresh page"), MemoryStore::new());

        assert_eq!(provider.get_content().await.unwrap(), "fresh page");
        assert_eq!(provider.store().get(CONTENT_KEY).unwrap(), "fresh page");
    }

    #[tokio::test]
    async fn test_success_overwrites_previous_cache() {
        let provider = ContentProvider::new(
            StubRemote::ok("new"),
            MemoryStore::with_entry(CONTENT_KEY, "old"),
        );

        let content = provider.fetch_content().await.unwrap();

        assert_eq!(content.body, "new");
        assert!(content.origin.is_fresh());
        assert_eq!(provider.store().get(CONTENT_KEY).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_cache_unchanged() {
        let provider = ContentProvider::new(
            StubRemote::failing(),
            MemoryStore::with_entry(CONTENT_KEY, "cached page"),
        );
        let before = provider
            .store()
            .entry(CONTENT_KEY)
            .unwrap()
            .map(|cached| cached.cached_at);

        let content = provider.fetch_content().await.unwrap();

        assert_eq!(content.body, "cached page");
        assert_eq!(
            content.origin,
            ContentOrigin::Cached { cached_at: before }
        );
        assert_eq!(provider.store().get(CONTENT_KEY).unwrap(), "cached page");
        let after = provider.store().entry(CONTENT_KEY).unwrap().unwrap();
        assert_eq!(Some(after.cached_at), before);
    }

    #[tokio::test]
    async fn test_file_store_fallback_pairs_body_with_its_timestamp() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        store.put(CONTENT_KEY, "<p>on disk</p>").unwrap();
        let written = store.entry(CONTENT_KEY).unwrap().unwrap();

        let provider = ContentProvider::new(StubRemote::failing(), store);
        let content = provider.fetch_content().await.unwrap();

        assert_eq!(content.body, written.data);
        assert_eq!(
            content.origin,
            ContentOrigin::Cached {
                cached_at: Some(written.cached_at)
            }
        );
    }

    #[tokio::test]
    async fn test_failure_without_cache_is_empty() {
        let provider = ContentProvider::new(StubRemote::failing(), MemoryStore::new());

        let content = provider.fetch_content().await.unwrap();

        assert_eq!(content.body, "");
        assert_eq!(content.origin, ContentOrigin::Empty);
        assert_eq!(provider.get_content().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_no_retries() {
        let provider = ContentProvider::new(StubRemote::failing(), MemoryStore::new());
        provider.get_content().await.unwrap();
        assert_eq!(provider.remote.calls.load(Ordering::SeqCst), 1);
    }
}
