//! Audit service: one request in, one report envelope out
//!
//! An audit validates the request, admits it through the rate limiter,
//! fetches the rendered page with retries and runs the analysis engine.

use crate::analyzer::{analyze, AnalysisOptions, AnalysisReport};
use crate::fetch::{scrape_url, FetchMetadata, RenderProvider, ScrapeOptions};
use crate::ratelimit::RateLimiter;
use crate::url::{host_key, normalize_target};
use crate::{Result, SeoError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// A page to audit and the sections to include
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
    #[serde(default)]
    pub options: AnalysisOptions,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            options: AnalysisOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }
}

/// Successful audit envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    pub success: bool,
    pub timestamp: DateTime<Utc>,

    /// The normalized target URL
    pub url: String,

    /// How the page was obtained
    pub metadata: FetchMetadata,
    pub results: AnalysisReport,
}

impl AuditResponse {
    fn new(url: String, metadata: FetchMetadata, results: AnalysisReport) -> Self {
        Self {
            success: true,
            timestamp: Utc::now(),
            url,
            metadata,
            results,
        }
    }
}

/// Runs audits against a rendering provider
pub struct Auditor<P: RenderProvider> {
    provider: P,
    scrape_options: ScrapeOptions,
    rate_limiter: RateLimiter,
}

impl<P: RenderProvider> Auditor<P> {
    /// Creates an auditor
    ///
    /// `scrape_options.timeout` is replaced per request by the request's own
    /// timeout option.
    pub fn new(provider: P, scrape_options: ScrapeOptions, rate_limiter: RateLimiter) -> Self {
        Self {
            provider,
            scrape_options,
            rate_limiter,
        }
    }

    /// Audits one page
    ///
    /// # Errors
    ///
    /// * `SeoError::InvalidOptions` - Timeout outside the accepted bounds
    /// * `SeoError::Validation` - Target URL rejected
    /// * `SeoError::RateLimited` - Target host used up its window
    /// * `SeoError::Scrape` - Provider could not deliver the page
    /// * `SeoError::Analysis` - Report could not be built
    pub async fn audit(&self, request: &AnalysisRequest) -> Result<AuditResponse> {
        request
            .options
            .validate()
            .map_err(SeoError::InvalidOptions)?;
        let target = normalize_target(&request.url)?;

        let key = host_key(&target).unwrap_or_else(|| target.to_string());
        self.rate_limiter.check(&key)?;

        tracing::info!("Auditing {}", target);

        let options = ScrapeOptions {
            timeout: Duration::from_millis(request.options.timeout),
            ..self.scrape_options
        };
        let fetched = scrape_url(&self.provider, &target, &options).await?;
        let results = analyze(&fetched.html, target.as_str(), &request.options)?;

        Ok(AuditResponse::new(
            target.to_string(),
            fetched.metadata,
            results,
        ))
    }
}

/// Audits markup already on hand, bypassing the provider and rate limiter
///
/// The envelope's metadata records zero attempts and the parse time.
pub fn audit_html(html: &str, url: &str, options: &AnalysisOptions) -> Result<AuditResponse> {
    options.validate().map_err(SeoError::InvalidOptions)?;
    let target = normalize_target(url)?;

    let started = Instant::now();
    let results = analyze(html, target.as_str(), options)?;

    let metadata = FetchMetadata {
        status_code: 200,
        headers: BTreeMap::new(),
        timing: started.elapsed().as_millis() as u64,
        attempts: 0,
        url: target.to_string(),
    };

    Ok(AuditResponse::new(target.to_string(), metadata, results))
}
