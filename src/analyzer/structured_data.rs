//! JSON-LD structured data

use crate::analyzer::document::ParsedDocument;
use crate::analyzer::AnalysisError;
use serde::Serialize;
use serde_json::Value;

/// Structured data section of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuredDataAnalysis {
    /// Number of JSON-LD script blocks found
    pub blocks: usize,

    /// Schema.org types declared by the valid blocks
    pub types: Vec<String>,
    pub issues: Vec<String>,
}

/// Parses every `<script type="application/ld+json">` block
///
/// Each block that fails to parse produces its own issue.
pub fn analyze_structured_data(
    doc: &ParsedDocument,
) -> Result<StructuredDataAnalysis, AnalysisError> {
    let mut analysis = StructuredDataAnalysis::default();

    for script in doc.select_all(r#"script[type="application/ld+json"]"#)? {
        analysis.blocks += 1;
        let body: String = script.text().collect();

        match serde_json::from_str::<Value>(body.trim()) {
            Ok(value) => collect_types(&value, &mut analysis.types),
            Err(e) => {
                tracing::debug!("Invalid JSON-LD block: {}", e);
                analysis
                    .issues
                    .push("Invalid JSON-LD structured data".to_string());
            }
        }
    }

    Ok(analysis)
}

/// Gathers `@type` values from an object, an array of objects, or an `@graph`
fn collect_types(value: &Value, types: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_types(item, types);
            }
        }
        Value::Object(object) => {
            match object.get("@type") {
                Some(Value::String(name)) => types.push(name.clone()),
                Some(Value::Array(names)) => {
                    types.extend(names.iter().filter_map(Value::as_str).map(str::to_string))
                }
                _ => {}
            }
            if let Some(graph) = object.get("@graph") {
                collect_types(graph, types);
            }
        }
        _ => {}
    }
}
