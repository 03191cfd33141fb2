//! Content volume and structure

use crate::analyzer::document::ParsedDocument;
use crate::analyzer::AnalysisError;
use scraper::{ElementRef, Node};
use serde::Serialize;

pub const MIN_WORDS: usize = 300;
pub const MIN_PARAGRAPHS: usize = 3;

/// Elements whose text is never shown to readers
const HIDDEN_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Content quality section of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQualityAnalysis {
    pub word_count: usize,
    pub paragraphs: usize,
    pub lists: usize,
    pub tables: usize,
    pub issues: Vec<String>,
}

/// Counts visible words and structural blocks in the body
pub fn analyze_content_quality(
    doc: &ParsedDocument,
) -> Result<ContentQualityAnalysis, AnalysisError> {
    let word_count = doc
        .first("body")?
        .map(|body| visible_text(&body).split_whitespace().count())
        .unwrap_or(0);
    let paragraphs = doc.count("p")?;
    let lists = doc.count("ul, ol")?;
    let tables = doc.count("table")?;

    let mut issues = Vec::new();
    if word_count < MIN_WORDS {
        issues.push(format!("Low word count (< {} words)", MIN_WORDS));
    }
    if paragraphs < MIN_PARAGRAPHS {
        issues.push(format!("Too few paragraphs (< {})", MIN_PARAGRAPHS));
    }

    Ok(ContentQualityAnalysis {
        word_count,
        paragraphs,
        lists,
        tables,
        issues,
    })
}

/// Elements that start a new line of text when rendered
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Visible text under `root`, skipping script-like subtrees
///
/// Adjacent text nodes are joined as they are, so inline markup inside a
/// word does not split it; block elements are separated by a space.
fn visible_text(root: &ElementRef<'_>) -> String {
    let mut text = String::new();
    push_visible_text(root, &mut text);
    text
}

fn push_visible_text(element: &ElementRef<'_>, text: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if HIDDEN_TEXT_TAGS.contains(&name) {
                continue;
            }

            let block = BLOCK_TAGS.contains(&name);
            if block {
                text.push(' ');
            }
            push_visible_text(&child_element, text);
            if block {
                text.push(' ');
            }
        } else if let Node::Text(chunk) = child.value() {
            text.push_str(chunk);
        }
    }
}
