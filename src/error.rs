// Error types for pagestat.
// Store, config and terminal failures are fatal; remote failures collapse into FetchFailed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No cache directory available on this platform")]
    NoCacheDir,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// The one error a remote fetch can produce.
///
/// Connection errors, timeouts, non-2xx statuses and undecodable bodies all
/// land here. The reason is for logs only; callers never branch on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("fetch failed: {reason}")]
pub struct FetchFailed {
    pub reason: String,
}

impl FetchFailed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for FetchFailed {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}
