//! HTML analysis engine
//!
//! This module turns rendered HTML plus its source URL into an
//! [`AnalysisReport`]:
//! - One analyzer per report section, each a pure function of the document
//! - Recommendations derived from section issues
//! - A 0-100 score derived from section issues
//!
//! # Example
//!
//! ```
//! use seo_lens::analyzer::{analyze, AnalysisOptions};
//!
//! let html = "<!DOCTYPE html><html lang=\"en\"><head><title>Hi</title></head><body></body></html>";
//! let report = analyze(html, "https://example.com/", &AnalysisOptions::default()).unwrap();
//! assert!(report.score <= 100);
//! ```

mod accessibility;
mod content;
pub mod document;
mod headings;
mod images;
mod links;
mod metadata;
mod mobile;
mod performance;
mod recommendations;
mod score;
mod security;
mod structured_data;
mod technical;

pub use accessibility::{analyze_accessibility, AccessibilityAnalysis};
pub use content::{analyze_content_quality, ContentQualityAnalysis};
pub use document::ParsedDocument;
pub use headings::{analyze_headings, Heading, HeadingAnalysis};
pub use images::{analyze_images, ImageAnalysis, MissingAltImage};
pub use links::{analyze_links, BrokenLink, Link, LinkAnalysis, SOCIAL_DOMAINS};
pub use metadata::{analyze_metadata, MetadataAnalysis, TextFieldAnalysis};
pub use mobile::{analyze_mobile, MobileAnalysis, TapTargetAnalysis};
pub use performance::{analyze_performance, PerformanceAnalysis};
pub use recommendations::{generate_recommendations, Priority, Recommendation};
pub use score::{calculate_score, issue_penalty};
pub use security::{analyze_security, SecurityAnalysis};
pub use structured_data::{analyze_structured_data, StructuredDataAnalysis};
pub use technical::{analyze_technical, TechnicalAnalysis};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Smallest accepted fetch timeout (milliseconds)
pub const MIN_TIMEOUT_MS: u64 = 1_000;

/// Largest accepted fetch timeout (milliseconds)
pub const MAX_TIMEOUT_MS: u64 = 30_000;

/// Errors raised while building a report
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid page URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// Per-request switches for optional report sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AnalysisOptions {
    /// Include the image inventory
    pub include_images: bool,

    /// Include the link inventory
    pub include_links: bool,

    /// Include performance heuristics
    pub include_performance: bool,

    /// Fetch timeout in milliseconds
    pub timeout: u64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            include_images: true,
            include_links: true,
            include_performance: true,
            timeout: MAX_TIMEOUT_MS,
        }
    }
}

impl AnalysisOptions {
    /// Checks that the timeout lies within the accepted bounds
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&self.timeout) {
            return Err(format!(
                "timeout must be between {} and {} ms, got {} ms",
                MIN_TIMEOUT_MS, MAX_TIMEOUT_MS, self.timeout
            ));
        }
        Ok(())
    }
}

/// The full technical-SEO report for one page
///
/// Sections switched off through [`AnalysisOptions`] are `None` and left out
/// of the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: MetadataAnalysis,
    pub headings: HeadingAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<LinkAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<ImageAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceAnalysis>,
    pub security: SecurityAnalysis,
    pub technical: TechnicalAnalysis,
    pub accessibility: AccessibilityAnalysis,
    pub structured_data: StructuredDataAnalysis,
    pub mobile: MobileAnalysis,
    pub content_quality: ContentQualityAnalysis,
    pub recommendations: Vec<Recommendation>,
    pub score: u8,
}

/// Builds the report for `html` served at `url`
///
/// Either every section is produced or an error is returned; there are no
/// partial reports.
///
/// # Arguments
///
/// * `html` - The rendered page markup
/// * `url` - The absolute URL the markup was fetched from
/// * `options` - Which optional sections to include
pub fn analyze(
    html: &str,
    url: &str,
    options: &AnalysisOptions,
) -> Result<AnalysisReport, AnalysisError> {
    let base_url = Url::parse(url).map_err(|e| AnalysisError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    tracing::debug!("Parsing {} bytes of HTML for {}", html.len(), url);
    let document = ParsedDocument::parse(html);

    let metadata = analyze_metadata(&document)?;
    let headings = analyze_headings(&document)?;
    let links = if options.include_links {
        Some(analyze_links(&document, &base_url)?)
    } else {
        None
    };
    let images = if options.include_images {
        Some(analyze_images(&document)?)
    } else {
        None
    };
    let performance = if options.include_performance {
        Some(analyze_performance(&document)?)
    } else {
        None
    };
    let security = analyze_security(&base_url);
    let technical = analyze_technical(&document)?;
    let accessibility = analyze_accessibility(&document)?;
    let structured_data = analyze_structured_data(&document)?;
    let mobile = analyze_mobile(&document)?;
    let content_quality = analyze_content_quality(&document)?;

    let recommendations =
        generate_recommendations(&metadata, &headings, images.as_ref(), &technical);
    let score = calculate_score(
        &metadata,
        &headings,
        images.as_ref(),
        &technical,
        &accessibility,
    );

    tracing::info!(
        "Analyzed {}: score {}, {} recommendation(s)",
        url,
        score,
        recommendations.len()
    );

    Ok(AnalysisReport {
        url: url.to_string(),
        timestamp: Utc::now(),
        metadata,
        headings,
        links,
        images,
        performance,
        security,
        technical,
        accessibility,
        structured_data,
        mobile,
        content_quality,
        recommendations,
        score,
    })
}
