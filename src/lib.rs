//! SEO-Lens: a single-page technical SEO auditor
//!
//! This crate fetches a page's rendered HTML through a third-party rendering
//! provider and turns it into a structured technical-SEO report with a
//! numeric score and prioritized recommendations.

pub mod analyzer;
pub mod audit;
pub mod config;
pub mod fetch;
pub mod output;
pub mod ratelimit;
pub mod url;

use thiserror::Error;

/// Main error type for SEO-Lens operations
#[derive(Debug, Error)]
pub enum SeoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid URL: {0}")]
    Validation(#[from] UrlError),

    #[error("Invalid analysis options: {0}")]
    InvalidOptions(String),

    #[error("{0}")]
    RateLimited(#[from] ratelimit::RateLimitExceeded),

    #[error("Scrape error: {0}")]
    Scrape(#[from] fetch::ScrapeError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] analyzer::AnalysisError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl SeoError {
    /// Maps the error to the HTTP status an API front end would answer with
    ///
    /// Validation problems are client errors. Everything else is classified
    /// by its message: timeouts become 504, rate limiting 429, and the rest 500.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InvalidOptions(_) => 400,
            Self::RateLimited(_) => 429,
            other => {
                let message = other.to_string().to_lowercase();
                if message.contains("timeout") || message.contains("timed out") {
                    504
                } else if message.contains("rate limit") || message.contains("429") {
                    429
                } else {
                    500
                }
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while validating a target URL
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),

    #[error("Host is not allowed: {0}")]
    DisallowedHost(String),
}

/// Result type alias for SEO-Lens operations
pub type Result<T> = std::result::Result<T, SeoError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analyzer::{analyze, AnalysisOptions, AnalysisReport};
pub use audit::{audit_html, AnalysisRequest, AuditResponse, Auditor};
pub use config::Config;
pub use fetch::{scrape_url, FetchResult, HttpRenderProvider, ScrapeError, ScrapeOptions};
pub use ratelimit::RateLimiter;
pub use url::normalize_target;
