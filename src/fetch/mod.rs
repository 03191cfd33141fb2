//! Fetch module for obtaining rendered HTML
//!
//! This module contains everything that talks to the rendering provider:
//! - The `RenderProvider` seam and its reqwest implementation
//! - Classification of provider failures into retryable and terminal
//! - The retry loop with linear backoff

mod provider;
mod retry;

pub use provider::{build_http_client, HttpRenderProvider, RenderProvider};
pub use retry::{scrape_url, should_retry};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default number of attempts made against the provider
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay between attempts (milliseconds)
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2000;

/// Default per-request timeout (milliseconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Rendered page returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchResult {
    /// The rendered HTML
    pub html: String,

    /// Information about the response that carried it
    pub metadata: FetchMetadata,
}

/// Response details recorded alongside the rendered HTML
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchMetadata {
    /// HTTP status code returned by the provider
    pub status_code: u16,

    /// Response headers (lowercase names)
    pub headers: BTreeMap<String, String>,

    /// Time spent on the successful attempt (milliseconds)
    pub timing: u64,

    /// Number of attempts it took to obtain the page
    pub attempts: u32,

    /// The page URL that was rendered
    pub url: String,
}

/// Retry behavior for [`scrape_url`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Maximum number of attempts (including the first)
    pub max_retries: u32,

    /// Base delay; the wait after attempt `n` is `retry_delay * n`
    pub retry_delay: Duration,

    /// Timeout applied to every single attempt
    pub timeout: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// A single failed attempt against the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    /// HTTP status, or `None` when no response was received
    pub status: Option<u16>,

    /// Human-readable failure description
    pub message: String,

    /// Excerpt of the response body, shown but never classified
    pub detail: Option<String>,
}

impl ProviderError {
    /// A failure where no HTTP response was received
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            detail: None,
        }
    }

    /// A failure carried by an HTTP response
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            detail: None,
        }
    }

    /// Attaches a response body excerpt; blank text is ignored
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if !detail.trim().is_empty() {
            self.detail = Some(detail);
        }
        self
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.message)?,
            None => write!(f, "{}", self.message)?,
        }
        match &self.detail {
            Some(detail) => write!(f, " ({})", detail),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        let status = e.status().map(|s| s.as_u16());
        let message = if e.is_timeout() {
            format!("Request timeout: {}", e)
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else {
            e.to_string()
        };
        Self {
            status,
            message,
            detail: None,
        }
    }
}

/// Raised once the provider could not deliver the page
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to fetch page after {attempts} attempt(s): {message}")]
pub struct ScrapeError {
    /// Attempts made before giving up
    pub attempts: u32,

    /// Message of the last underlying failure
    pub message: String,
}
