// HTTP client for the watched page.
// Issues a plain GET and folds every failure into FetchFailed.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::config::AppConfig;
use crate::error::{AppError, FetchFailed, Result};

use super::RemoteSource;

/// Fetches a single page relative to a base URL.
pub struct PageClient {
    client: Client,
    url: Url,
}

impl PageClient {
    /// Build a client for `base_url` joined with `page_path`.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let url = Url::parse(&config.base_url)
            .and_then(|base| base.join(&config.page_path))
            .map_err(|e| AppError::Other(format!("Invalid page URL: {}", e)))?;

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Other(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl RemoteSource for PageClient {
    async fn fetch(&self) -> std::result::Result<String, FetchFailed> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailed::new(format!("HTTP {} from {}", status, self.url)));
        }

        Ok(response.text().await?)
    }
}
