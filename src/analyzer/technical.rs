//! Document-level technical checklist

use crate::analyzer::document::ParsedDocument;
use crate::analyzer::AnalysisError;
use serde::Serialize;

/// Technical section of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TechnicalAnalysis {
    pub viewport: Option<String>,
    pub charset: Option<String>,
    pub language: Option<String>,
    pub doctype: bool,
    pub issues: Vec<String>,
}

/// Reads viewport, charset, language and DOCTYPE
///
/// Each missing item yields exactly one issue, in checklist order.
pub fn analyze_technical(doc: &ParsedDocument) -> Result<TechnicalAnalysis, AnalysisError> {
    let viewport = doc.first_attr(r#"meta[name="viewport"]"#, "content")?;
    let charset = declared_charset(doc)?;
    let language = doc
        .root()
        .value()
        .attr("lang")
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(str::to_string);
    let doctype = doc.has_doctype();

    let mut issues = Vec::new();
    if viewport.is_none() {
        issues.push("Missing viewport meta tag".to_string());
    }
    if charset.is_none() {
        issues.push("Missing charset declaration".to_string());
    }
    if language.is_none() {
        issues.push("Missing language attribute".to_string());
    }
    if !doctype {
        issues.push("Missing DOCTYPE declaration".to_string());
    }

    Ok(TechnicalAnalysis {
        viewport,
        charset,
        language,
        doctype,
        issues,
    })
}

/// `<meta charset>` first, then the legacy `http-equiv="Content-Type"` form
fn declared_charset(doc: &ParsedDocument) -> Result<Option<String>, AnalysisError> {
    if let Some(charset) = doc.first_attr("meta[charset]", "charset")? {
        return Ok(Some(charset));
    }

    for meta in doc.select_all("meta[http-equiv]")? {
        let is_content_type = meta
            .value()
            .attr("http-equiv")
            .is_some_and(|v| v.eq_ignore_ascii_case("content-type"));
        if !is_content_type {
            continue;
        }
        if let Some(content) = meta.value().attr("content") {
            let lower = content.to_ascii_lowercase();
            if let Some(idx) = lower.find("charset=") {
                let charset = content[idx + "charset=".len()..]
                    .split(';')
                    .next()
                    .unwrap_or_default()
                    .trim();
                if !charset.is_empty() {
                    return Ok(Some(charset.to_string()));
                }
            }
        }
    }

    Ok(None)
}
