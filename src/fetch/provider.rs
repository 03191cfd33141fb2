//! Rendering provider client
//!
//! The provider is a remote service that loads a page in a real browser and
//! returns the resulting HTML. It is addressed as
//! `GET {endpoint}?api_key=...&url=...&render_js=...`.

use crate::fetch::{FetchMetadata, FetchResult, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use url::Url;

/// Longest provider error body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Anything that can turn a page URL into rendered HTML
///
/// A single call is a single attempt; retries are layered on top by
/// [`scrape_url`](crate::fetch::scrape_url).
#[async_trait]
pub trait RenderProvider: Send + Sync {
    /// Renders `url`, giving up after `timeout`
    async fn render(&self, url: &Url, timeout: Duration) -> Result<FetchResult, ProviderError>;
}

/// Builds an HTTP client for talking to the rendering provider
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Rendering provider reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpRenderProvider {
    client: Client,
    endpoint: Url,
    api_key: String,
    render_js: bool,
}

impl HttpRenderProvider {
    /// Creates a provider client for `endpoint` authenticated with `api_key`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use seo_lens::fetch::{build_http_client, HttpRenderProvider};
    /// use url::Url;
    ///
    /// let client = build_http_client().unwrap();
    /// let endpoint = Url::parse("https://app.scrapingbee.com/api/v1/").unwrap();
    /// let provider = HttpRenderProvider::new(client, endpoint, "secret".to_string());
    /// ```
    pub fn new(client: Client, endpoint: Url, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            render_js: true,
        }
    }

    /// Sets whether the provider should execute JavaScript before returning
    pub fn with_render_js(mut self, render_js: bool) -> Self {
        self.render_js = render_js;
        self
    }
}

#[async_trait]
impl RenderProvider for HttpRenderProvider {
    async fn render(&self, url: &Url, timeout: Duration) -> Result<FetchResult, ProviderError> {
        let started = Instant::now();
        let render_js = if self.render_js { "true" } else { "false" };

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("url", url.as_str()),
                ("render_js", render_js),
            ])
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.text().await?;

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown Status");
            let detail = truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS);
            return Err(ProviderError::http(status.as_u16(), reason).with_detail(detail));
        }

        if body.is_empty() {
            return Err(ProviderError::http(
                status.as_u16(),
                "Empty response from rendering provider",
            ));
        }

        Ok(FetchResult {
            html: body,
            metadata: FetchMetadata {
                status_code: status.as_u16(),
                headers,
                timing: started.elapsed().as_millis() as u64,
                attempts: 1,
                url: url.to_string(),
            },
        })
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
