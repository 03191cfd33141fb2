use crate::analyzer::AnalysisOptions;
use crate::fetch::{ScrapeOptions, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MS};
use serde::Deserialize;
use std::time::Duration;

/// Default rendering provider endpoint
pub const DEFAULT_ENDPOINT: &str = "https://app.scrapingbee.com/api/v1/";

/// Environment variable consulted for the provider API key
pub const DEFAULT_API_KEY_ENV: &str = "SEO_LENS_API_KEY";

/// Main configuration structure for SEO-Lens
///
/// Every section is optional; missing sections and keys take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub analysis: AnalysisOptions,
    #[serde(rename = "rate-limit")]
    pub rate_limit: RateLimitConfig,
}

/// Rendering provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProviderConfig {
    /// Base URL of the rendering API
    pub endpoint: String,

    /// API key given inline; takes precedence over `api_key_env`
    pub api_key: Option<String>,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Ask the provider to execute JavaScript before returning HTML
    pub render_js: bool,

    /// Maximum number of attempts per page
    pub max_retries: u32,

    /// Base delay between attempts (milliseconds)
    pub retry_delay_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            render_js: true,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl ProviderConfig {
    /// Returns the inline key, or the one found in the configured env variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Retry behavior for a fetch bounded by `timeout_ms`
    pub fn scrape_options(&self, timeout_ms: u64) -> ScrapeOptions {
        ScrapeOptions {
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

/// Per-host request admission
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RateLimitConfig {
    /// Requests admitted per window
    pub max_requests: u32,

    /// Window length (seconds)
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_secs: 60,
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}
