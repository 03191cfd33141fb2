//! Mobile-friendliness heuristics
//!
//! Without a layout engine there are no computed sizes, so tap targets are
//! judged only by inline `style` widths and heights given in pixels. Elements
//! without inline sizes are never flagged.

use crate::analyzer::document::{normalized_text, truncate_chars, ParsedDocument};
use crate::analyzer::AnalysisError;
use scraper::ElementRef;
use serde::Serialize;

/// Minimum comfortable tap target edge (CSS pixels)
pub const MIN_TAP_TARGET_PX: f64 = 48.0;

const INTERACTIVE_SELECTOR: &str = "a, button, input, select, textarea";

/// Tap target inventory
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TapTargetAnalysis {
    /// Interactive elements on the page
    pub total: usize,

    /// Short descriptions of elements whose inline size is too small
    pub small: Vec<String>,
}

/// Mobile section of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileAnalysis {
    pub viewport: Option<String>,

    /// Viewport contains `width=device-width`
    pub responsive_viewport: bool,
    pub tap_targets: TapTargetAnalysis,
    pub issues: Vec<String>,
}

/// Checks the viewport declaration and inline tap-target sizes
pub fn analyze_mobile(doc: &ParsedDocument) -> Result<MobileAnalysis, AnalysisError> {
    let viewport = doc.first_attr(r#"meta[name="viewport"]"#, "content")?;
    let responsive_viewport = viewport
        .as_deref()
        .map(|content| {
            content
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase()
                .contains("width=device-width")
        })
        .unwrap_or(false);

    let mut tap_targets = TapTargetAnalysis::default();
    for element in doc.select_all(INTERACTIVE_SELECTOR)? {
        tap_targets.total += 1;
        if is_small_tap_target(&element) {
            tap_targets.small.push(describe(&element));
        }
    }

    let mut issues = Vec::new();
    if viewport.is_none() {
        issues.push("Missing viewport meta tag".to_string());
    } else if !responsive_viewport {
        issues.push("Viewport not configured for device width".to_string());
    }
    if !tap_targets.small.is_empty() {
        issues.push(format!(
            "Small tap targets found: {}",
            tap_targets.small.len()
        ));
    }

    Ok(MobileAnalysis {
        viewport,
        responsive_viewport,
        tap_targets,
        issues,
    })
}

fn is_small_tap_target(element: &ElementRef<'_>) -> bool {
    let Some(style) = element.value().attr("style") else {
        return false;
    };

    ["width", "height"]
        .iter()
        .filter_map(|property| inline_px(style, property))
        .any(|px| px < MIN_TAP_TARGET_PX)
}

/// Reads `property: <n>px` from an inline style declaration
fn inline_px(style: &str, property: &str) -> Option<f64> {
    style.split(';').find_map(|declaration| {
        let (name, value) = declaration.split_once(':')?;
        if !name.trim().eq_ignore_ascii_case(property) {
            return None;
        }
        value
            .trim()
            .to_ascii_lowercase()
            .strip_suffix("px")?
            .trim()
            .parse::<f64>()
            .ok()
    })
}

fn describe(element: &ElementRef<'_>) -> String {
    let label = normalized_text(element);
    let label = if label.is_empty() {
        element
            .value()
            .attr("href")
            .or_else(|| element.value().attr("name"))
            .unwrap_or_default()
            .to_string()
    } else {
        label
    };
    format!("<{}> {}", element.value().name(), truncate_chars(&label, 50))
        .trim_end()
        .to_string()
}
