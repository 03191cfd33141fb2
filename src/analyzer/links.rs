//! Link inventory: internal, external, social and broken anchors

use crate::analyzer::document::{normalized_text, ParsedDocument};
use crate::analyzer::AnalysisError;
use serde::Serialize;
use url::Url;

/// Hosts whose links are additionally tagged as social
pub const SOCIAL_DOMAINS: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "linkedin.com",
    "instagram.com",
    "pinterest.com",
    "youtube.com",
];

/// A resolvable anchor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    /// Absolute URL after resolving against the page URL
    pub url: String,
    pub text: String,
    pub rel: Option<String>,
}

/// An anchor that cannot be followed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrokenLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub text: String,
    pub reason: String,
}

/// Links section of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkAnalysis {
    pub internal: Vec<Link>,
    pub external: Vec<Link>,
    pub social: Vec<Link>,
    pub broken: Vec<BrokenLink>,
    pub nofollow: usize,
    pub sponsored: usize,
    pub ugc: usize,

    /// `internal.len() + external.len()`
    pub total: usize,
    pub issues: Vec<String>,
}

/// Classifies every `<a>` on the page relative to `base_url`
///
/// # Classification Rules
///
/// - No `href` → broken ("Missing href attribute")
/// - `href` fails to resolve → broken ("Invalid URL format")
/// - Resolved host equals the page host → internal, otherwise external
/// - Resolved host contains a [`SOCIAL_DOMAINS`] entry → also social
///
/// `rel` values are tallied on every anchor; one link may count towards
/// several of nofollow, sponsored and ugc.
pub fn analyze_links(doc: &ParsedDocument, base_url: &Url) -> Result<LinkAnalysis, AnalysisError> {
    let mut analysis = LinkAnalysis::default();
    let base_host = base_url.host_str();

    for anchor in doc.select_all("a")? {
        let text = normalized_text(&anchor);
        let rel = anchor.value().attr("rel");

        if let Some(rel) = rel {
            let rel = rel.to_lowercase();
            if rel.contains("nofollow") {
                analysis.nofollow += 1;
            }
            if rel.contains("sponsored") {
                analysis.sponsored += 1;
            }
            if rel.contains("ugc") {
                analysis.ugc += 1;
            }
        }

        let Some(href) = anchor.value().attr("href") else {
            analysis.broken.push(BrokenLink {
                href: None,
                text,
                reason: "Missing href attribute".to_string(),
            });
            continue;
        };

        let resolved = match base_url.join(href) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::trace!("Could not resolve href {:?}: {}", href, e);
                analysis.broken.push(BrokenLink {
                    href: Some(href.to_string()),
                    text,
                    reason: "Invalid URL format".to_string(),
                });
                continue;
            }
        };

        let host = resolved.host_str();
        let link = Link {
            url: resolved.to_string(),
            text,
            rel: rel.map(str::to_string),
        };

        if host.is_some_and(|h| SOCIAL_DOMAINS.iter().any(|social| h.contains(social))) {
            analysis.social.push(link.clone());
        }

        if host == base_host {
            analysis.internal.push(link);
        } else {
            analysis.external.push(link);
        }
    }

    analysis.total = analysis.internal.len() + analysis.external.len();

    if !analysis.broken.is_empty() {
        analysis
            .issues
            .push(format!("Found {} broken links", analysis.broken.len()));
    }
    if !analysis.external.is_empty() && analysis.nofollow == 0 {
        analysis
            .issues
            .push("External links without nofollow attributes".to_string());
    }

    tracing::debug!(
        "Links: {} internal, {} external, {} broken",
        analysis.internal.len(),
        analysis.external.len(),
        analysis.broken.len()
    );

    Ok(analysis)
}
