//! Overall 0-100 score
//!
//! Only title, description, headings, images, technical and accessibility
//! issues count. Every issue costs a fixed number of points picked by
//! case-sensitive substring: "Missing" is checked before "Multiple".

use crate::analyzer::{
    AccessibilityAnalysis, HeadingAnalysis, ImageAnalysis, MetadataAnalysis, TechnicalAnalysis,
};

const MISSING_PENALTY: i32 = 5;
const MULTIPLE_PENALTY: i32 = 3;
const DEFAULT_PENALTY: i32 = 2;

/// Points deducted for a single issue
pub fn issue_penalty(issue: &str) -> i32 {
    if issue.contains("Missing") {
        MISSING_PENALTY
    } else if issue.contains("Multiple") {
        MULTIPLE_PENALTY
    } else {
        DEFAULT_PENALTY
    }
}

/// Reduces the scored sections to a value in `0..=100`
pub fn calculate_score(
    metadata: &MetadataAnalysis,
    headings: &HeadingAnalysis,
    images: Option<&ImageAnalysis>,
    technical: &TechnicalAnalysis,
    accessibility: &AccessibilityAnalysis,
) -> u8 {
    let image_issues: &[String] = images.map(|i| i.issues.as_slice()).unwrap_or_default();

    let deductions: i32 = metadata
        .title
        .issues
        .iter()
        .chain(&metadata.description.issues)
        .chain(&headings.issues)
        .chain(image_issues)
        .chain(&technical.issues)
        .chain(&accessibility.issues)
        .map(|issue| issue_penalty(issue))
        .sum();

    (100 - deductions).clamp(0, 100) as u8
}
