//! Accessibility heuristics: ARIA usage, skip links and form labels

use crate::analyzer::document::ParsedDocument;
use crate::analyzer::AnalysisError;
use serde::Serialize;

const ARIA_SELECTOR: &str = "[aria-label], [aria-describedby], [aria-hidden]";
const SKIP_LINK_SELECTOR: &str = r##"a[href="#main"], a[href="#content"]"##;
const FORM_INPUT_SELECTOR: &str = "input, select, textarea";

/// Accessibility section of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityAnalysis {
    /// Elements carrying aria-label, aria-describedby or aria-hidden
    pub aria_elements: usize,
    pub skip_links: bool,
    pub form_labels: usize,
    pub form_inputs: usize,
    pub issues: Vec<String>,
}

/// Counts ARIA usage and compares form labels against fields
///
/// Labels and fields are compared by count only; no per-field pairing is
/// attempted.
pub fn analyze_accessibility(doc: &ParsedDocument) -> Result<AccessibilityAnalysis, AnalysisError> {
    let aria_elements = doc.count(ARIA_SELECTOR)?;
    let skip_links = doc.count(SKIP_LINK_SELECTOR)? > 0;
    let form_labels = doc.count("label")?;
    let form_inputs = doc.count(FORM_INPUT_SELECTOR)?;

    let mut issues = Vec::new();
    if !skip_links {
        issues.push("No skip navigation links found".to_string());
    }
    if form_inputs > form_labels {
        issues.push("Some form inputs missing labels".to_string());
    }

    Ok(AccessibilityAnalysis {
        aria_elements,
        skip_links,
        form_labels,
        form_inputs,
        issues,
    })
}
