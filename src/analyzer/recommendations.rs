//! Recommendations derived from section issues

use crate::analyzer::{HeadingAnalysis, ImageAnalysis, MetadataAnalysis, TechnicalAnalysis};
use serde::Serialize;

/// How urgently a recommendation should be addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// One prioritized suggestion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,

    /// The source section's issues, comma separated
    pub issue: String,
    pub solution: String,
}

impl Recommendation {
    fn from_issues(category: &str, priority: Priority, issues: &[String], solution: &str) -> Self {
        Self {
            category: category.to_string(),
            priority,
            issue: issues.join(", "),
            solution: solution.to_string(),
        }
    }
}

/// Builds one recommendation per source that reported issues
///
/// # Sources
///
/// | Source | Category | Priority |
/// |--------|----------|----------|
/// | Title | Metadata | High |
/// | Meta description | Metadata | High |
/// | Headings | Content Structure | Medium |
/// | Images | Images | Medium |
/// | Technical | Technical SEO | High |
///
/// Priority is fixed per source and does not depend on the issues found.
pub fn generate_recommendations(
    metadata: &MetadataAnalysis,
    headings: &HeadingAnalysis,
    images: Option<&ImageAnalysis>,
    technical: &TechnicalAnalysis,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if !metadata.title.issues.is_empty() {
        recommendations.push(Recommendation::from_issues(
            "Metadata",
            Priority::High,
            &metadata.title.issues,
            "Give the page a single, unique title tag between 30 and 60 characters long",
        ));
    }

    if !metadata.description.issues.is_empty() {
        recommendations.push(Recommendation::from_issues(
            "Metadata",
            Priority::High,
            &metadata.description.issues,
            "Write a unique meta description between 120 and 160 characters long",
        ));
    }

    if !headings.issues.is_empty() {
        recommendations.push(Recommendation::from_issues(
            "Content Structure",
            Priority::Medium,
            &headings.issues,
            "Use exactly one H1 and step down heading levels one at a time",
        ));
    }

    if let Some(images) = images.filter(|images| !images.issues.is_empty()) {
        recommendations.push(Recommendation::from_issues(
            "Images",
            Priority::Medium,
            &images.issues,
            "Add descriptive alt text and explicit width and height attributes to every image",
        ));
    }

    if !technical.issues.is_empty() {
        recommendations.push(Recommendation::from_issues(
            "Technical SEO",
            Priority::High,
            &technical.issues,
            "Declare a DOCTYPE, character set, document language and responsive viewport",
        ));
    }

    recommendations
}
