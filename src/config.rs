// Application configuration.
// Loaded from PAGESTAT_* environment variables with defaults for every key.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::analysis::AnalysisOptions;
use crate::error::Result;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Site root the page path is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_path")]
    pub page_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Overrides the platform cache directory when set.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    #[serde(default = "default_sample_stride")]
    pub sample_stride: usize,
    #[serde(default = "default_top_words")]
    pub top_words: usize,
}

fn default_base_url() -> String {
    "https://example.com/".to_string()
}

fn default_page_path() -> String {
    "about/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("pagestat/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_sample_stride() -> usize {
    10
}

fn default_top_words() -> usize {
    100
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_path: default_page_path(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            cache_dir: None,
            sample_stride: default_sample_stride(),
            top_words: default_top_words(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `PAGESTAT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("PAGESTAT"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            sample_stride: self.sample_stride,
            top_words: self.top_words,
        }
    }
}
