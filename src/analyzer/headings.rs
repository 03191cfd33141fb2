//! Heading inventory and hierarchy checks

use crate::analyzer::document::{normalized_text, ParsedDocument};
use crate::analyzer::AnalysisError;
use serde::Serialize;

/// A heading's text and its length in characters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub text: String,
    pub length: usize,
}

/// Headings section of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadingAnalysis {
    pub h1: Vec<Heading>,
    pub h2: Vec<Heading>,
    pub h3: Vec<Heading>,
    pub h4: Vec<Heading>,
    pub h5: Vec<Heading>,
    pub h6: Vec<Heading>,
    pub issues: Vec<String>,
}

impl HeadingAnalysis {
    fn level_mut(&mut self, level: u8) -> Option<&mut Vec<Heading>> {
        match level {
            1 => Some(&mut self.h1),
            2 => Some(&mut self.h2),
            3 => Some(&mut self.h3),
            4 => Some(&mut self.h4),
            5 => Some(&mut self.h5),
            6 => Some(&mut self.h6),
            _ => None,
        }
    }
}

/// Collects H1-H6 and checks the heading outline
///
/// Every transition that jumps more than one level deeper than the previous
/// heading is reported on its own. The walk starts as if an H1 preceded the
/// first heading.
pub fn analyze_headings(doc: &ParsedDocument) -> Result<HeadingAnalysis, AnalysisError> {
    let mut analysis = HeadingAnalysis::default();
    let mut hierarchy_issues = Vec::new();
    let mut previous_level: u8 = 1;

    for element in doc.select_all("h1, h2, h3, h4, h5, h6")? {
        let Some(level) = heading_level(element.value().name()) else {
            continue;
        };

        let text = normalized_text(&element);
        if let Some(bucket) = analysis.level_mut(level) {
            bucket.push(Heading {
                length: text.chars().count(),
                text,
            });
        }

        if level > previous_level + 1 {
            hierarchy_issues.push(format!(
                "Skipped heading level: from H{} to H{}",
                previous_level, level
            ));
        }
        previous_level = level;
    }

    if analysis.h1.is_empty() {
        analysis.issues.push("Missing H1 heading".to_string());
    } else if analysis.h1.len() > 1 {
        analysis.issues.push("Multiple H1 headings found".to_string());
    }
    analysis.issues.extend(hierarchy_issues);

    Ok(analysis)
}

fn heading_level(tag: &str) -> Option<u8> {
    tag.strip_prefix('h')
        .and_then(|digit| digit.parse::<u8>().ok())
        .filter(|level| (1..=6).contains(level))
}
