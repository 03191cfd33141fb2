//! Queryable wrapper around a parsed HTML document

use crate::analyzer::AnalysisError;
use scraper::{ElementRef, Html, Node, Selector};

/// An HTML document parsed once and queried by every section analyzer
///
/// The tree is never mutated after parsing.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    /// Parses `markup` as a full HTML document
    ///
    /// Parsing is error-tolerant: malformed markup is repaired the way a
    /// browser would repair it.
    ///
    /// # Example
    ///
    /// ```
    /// use seo_lens::analyzer::ParsedDocument;
    ///
    /// let doc = ParsedDocument::parse("<title>Hello</title><p>World</p>");
    /// assert_eq!(doc.count("p").unwrap(), 1);
    /// ```
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Returns all elements matching `css`, in document order
    pub fn select_all(&self, css: &str) -> Result<Vec<ElementRef<'_>>, AnalysisError> {
        let selector = parse_selector(css)?;
        Ok(self.html.select(&selector).collect())
    }

    /// Returns the first element matching `css`
    pub fn first(&self, css: &str) -> Result<Option<ElementRef<'_>>, AnalysisError> {
        let selector = parse_selector(css)?;
        Ok(self.html.select(&selector).next())
    }

    /// Counts the elements matching `css`
    pub fn count(&self, css: &str) -> Result<usize, AnalysisError> {
        let selector = parse_selector(css)?;
        Ok(self.html.select(&selector).count())
    }

    /// Returns `attr` of the first element matching `css`
    pub fn first_attr(&self, css: &str, attr: &str) -> Result<Option<String>, AnalysisError> {
        Ok(self
            .first(css)?
            .and_then(|element| element.value().attr(attr))
            .map(str::to_string))
    }

    /// Returns the root `<html>` element
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Whether the source declared a DOCTYPE
    pub fn has_doctype(&self) -> bool {
        self.html
            .tree
            .root()
            .children()
            .any(|node| matches!(node.value(), Node::Doctype(_)))
    }
}

fn parse_selector(css: &str) -> Result<Selector, AnalysisError> {
    Selector::parse(css).map_err(|e| AnalysisError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Text content of an element with surrounding whitespace trimmed
pub fn trimmed_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text content of an element with runs of whitespace collapsed
///
/// Text nodes are joined as they are, so inline markup inside a word
/// (`<b>S</b>EO`) keeps the word whole.
pub fn normalized_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Replaces every run of whitespace with a single space and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates `text` to at most `max` characters
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
