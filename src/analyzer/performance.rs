//! Resource hints, script loading and stylesheet count

use crate::analyzer::document::ParsedDocument;
use crate::analyzer::AnalysisError;
use serde::Serialize;

/// Stylesheet count above which the page is flagged
pub const MAX_STYLESHEETS: usize = 5;

/// Performance section of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    pub preload: Vec<String>,
    pub preconnect: Vec<String>,
    pub prefetch: Vec<String>,
    pub total_scripts: usize,
    pub deferred_scripts: usize,
    pub async_scripts: usize,
    pub total_styles: usize,
    pub issues: Vec<String>,
}

/// Collects resource hints and script/stylesheet loading patterns
pub fn analyze_performance(doc: &ParsedDocument) -> Result<PerformanceAnalysis, AnalysisError> {
    let mut analysis = PerformanceAnalysis {
        preload: hint_targets(doc, "preload")?,
        preconnect: hint_targets(doc, "preconnect")?,
        prefetch: hint_targets(doc, "prefetch")?,
        ..PerformanceAnalysis::default()
    };

    for script in doc.select_all("script")? {
        analysis.total_scripts += 1;
        if script.value().attr("defer").is_some() {
            analysis.deferred_scripts += 1;
        }
        if script.value().attr("async").is_some() {
            analysis.async_scripts += 1;
        }
    }

    analysis.total_styles = doc.count(r#"link[rel="stylesheet"]"#)?;

    if analysis.total_scripts > 0 && analysis.deferred_scripts == 0 && analysis.async_scripts == 0 {
        analysis
            .issues
            .push("No deferred or async scripts found".to_string());
    }
    if analysis.total_styles > MAX_STYLESHEETS {
        analysis
            .issues
            .push("High number of stylesheet files".to_string());
    }

    Ok(analysis)
}

fn hint_targets(doc: &ParsedDocument, rel: &str) -> Result<Vec<String>, AnalysisError> {
    Ok(doc
        .select_all(&format!(r#"link[rel="{}"]"#, rel))?
        .iter()
        .filter_map(|link| link.value().attr("href"))
        .map(str::to_string)
        .collect())
}
