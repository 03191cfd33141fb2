//! Image inventory: alt text and explicit dimensions

use crate::analyzer::document::{truncate_chars, ParsedDocument};
use crate::analyzer::AnalysisError;
use scraper::ElementRef;
use serde::Serialize;

/// Longest parent-markup snippet kept as context
const MAX_CONTEXT_CHARS: usize = 200;

/// An image without an `alt` attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingAltImage {
    pub src: String,

    /// Markup of the parent element, truncated
    pub context: String,
}

/// Images section of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub total: usize,
    pub with_alt: usize,
    pub without_alt: Vec<MissingAltImage>,
    pub issues: Vec<String>,
}

/// Checks every `<img>` for alt text and width/height attributes
///
/// An empty `alt=""` counts as present (decorative image).
pub fn analyze_images(doc: &ParsedDocument) -> Result<ImageAnalysis, AnalysisError> {
    let mut analysis = ImageAnalysis::default();

    for img in doc.select_all("img")? {
        analysis.total += 1;
        let element = img.value();
        let src = element.attr("src").unwrap_or_default().to_string();

        if element.attr("alt").is_none() {
            analysis.without_alt.push(MissingAltImage {
                src: src.clone(),
                context: parent_markup(&img),
            });
        } else {
            analysis.with_alt += 1;
        }

        if element.attr("width").is_none() || element.attr("height").is_none() {
            analysis
                .issues
                .push(format!("Image missing dimensions: {}", src));
        }
    }

    if !analysis.without_alt.is_empty() {
        analysis.issues.push(format!(
            "{} images missing alt text",
            analysis.without_alt.len()
        ));
    }

    tracing::debug!(
        "Images: {} total, {} without alt",
        analysis.total,
        analysis.without_alt.len()
    );

    Ok(analysis)
}

fn parent_markup(img: &ElementRef<'_>) -> String {
    img.parent()
        .and_then(ElementRef::wrap)
        .map(|parent| truncate_chars(&parent.html(), MAX_CONTEXT_CHARS))
        .unwrap_or_default()
}
