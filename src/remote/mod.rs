// Remote page module.
// Defines the fetch seam and the HTTP client behind it.

pub mod client;

use async_trait::async_trait;

use crate::error::FetchFailed;

pub use client::PageClient;

/// Source of fresh page content.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the page body.
    async fn fetch(&self) -> Result<String, FetchFailed>;
}
