//! Title, description and other `<head>` metadata

use crate::analyzer::document::{trimmed_text, ParsedDocument};
use crate::analyzer::AnalysisError;
use scraper::ElementRef;
use serde::Serialize;
use std::collections::BTreeMap;

pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MIN_CHARS: usize = 120;
pub const DESCRIPTION_MAX_CHARS: usize = 160;

/// A single text field (title or description) and its problems
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextFieldAnalysis {
    /// Trimmed content, `None` when absent or empty
    pub content: Option<String>,

    /// Length of `content` in characters
    pub length: usize,

    pub issues: Vec<String>,
}

/// Metadata section of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataAnalysis {
    pub title: TextFieldAnalysis,
    pub description: TextFieldAnalysis,
    pub keywords: Vec<String>,
    pub canonical: Option<String>,
    pub robots: Option<String>,

    /// `og:*` properties, first occurrence wins
    pub open_graph: BTreeMap<String, String>,
}

/// Extracts and checks the page's metadata
pub fn analyze_metadata(doc: &ParsedDocument) -> Result<MetadataAnalysis, AnalysisError> {
    let titles = doc.select_all("title")?;
    let title = analyze_title(&titles);

    let description = analyze_description(
        doc.first_attr(r#"meta[name="description"]"#, "content")?
            .as_deref(),
    );

    let keywords = doc
        .first_attr(r#"meta[name="keywords"]"#, "content")?
        .map(|raw| split_keywords(&raw))
        .unwrap_or_default();

    let canonical = doc.first_attr(r#"link[rel="canonical"]"#, "href")?;
    let robots = doc.first_attr(r#"meta[name="robots"]"#, "content")?;

    let mut open_graph = BTreeMap::new();
    for meta in doc.select_all(r#"meta[property^="og:"]"#)? {
        if let (Some(property), Some(content)) =
            (meta.value().attr("property"), meta.value().attr("content"))
        {
            open_graph
                .entry(property.to_string())
                .or_insert_with(|| content.to_string());
        }
    }

    tracing::debug!(
        "Metadata: title={:?}, description length={}, {} keyword(s)",
        title.content,
        description.length,
        keywords.len()
    );

    Ok(MetadataAnalysis {
        title,
        description,
        keywords,
        canonical,
        robots,
        open_graph,
    })
}

fn analyze_title(titles: &[ElementRef<'_>]) -> TextFieldAnalysis {
    let content = titles
        .first()
        .map(trimmed_text)
        .filter(|text| !text.is_empty());

    let mut analysis = TextFieldAnalysis::default();

    match content {
        None => analysis.issues.push("Missing title tag".to_string()),
        Some(text) => {
            if titles.len() > 1 {
                analysis
                    .issues
                    .push(format!("Multiple title tags found ({})", titles.len()));
            }

            analysis.length = text.chars().count();
            if analysis.length < TITLE_MIN_CHARS {
                analysis.issues.push(format!(
                    "Title too short (< {} characters)",
                    TITLE_MIN_CHARS
                ));
            } else if analysis.length > TITLE_MAX_CHARS {
                analysis.issues.push(format!(
                    "Title too long (> {} characters)",
                    TITLE_MAX_CHARS
                ));
            }
            analysis.content = Some(text);
        }
    }

    analysis
}

fn analyze_description(raw: Option<&str>) -> TextFieldAnalysis {
    let content = raw.map(str::trim).filter(|text| !text.is_empty());

    let mut analysis = TextFieldAnalysis::default();

    match content {
        None => analysis.issues.push("Missing meta description".to_string()),
        Some(text) => {
            analysis.length = text.chars().count();
            if analysis.length < DESCRIPTION_MIN_CHARS {
                analysis.issues.push(format!(
                    "Description too short (< {} characters)",
                    DESCRIPTION_MIN_CHARS
                ));
            } else if analysis.length > DESCRIPTION_MAX_CHARS {
                analysis.issues.push(format!(
                    "Description too long (> {} characters)",
                    DESCRIPTION_MAX_CHARS
                ));
            }
            analysis.content = Some(text.to_string());
        }
    }

    analysis
}

fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}
