//! Markdown report generation
//!
//! This module renders an audit as a human-readable markdown document: the
//! score, the recommendation table and one short block per report section.

use crate::audit::AuditResponse;

/// Formats an audit as markdown
///
/// # Arguments
///
/// * `response` - The audit envelope to render
///
/// # Returns
///
/// A formatted markdown string
pub fn render_markdown(response: &AuditResponse) -> String {
    let report = &response.results;
    let mut md = String::new();

    // Title
    md.push_str("# SEO-Lens Report\n\n");
    md.push_str(&format!("- **URL**: {}\n", response.url));
    md.push_str(&format!("- **Analyzed**: {}\n", response.timestamp.to_rfc3339()));
    md.push_str(&format!("- **Score**: {}/100\n", report.score));
    if response.metadata.attempts > 0 {
        md.push_str(&format!(
            "- **Fetch**: HTTP {} in {}ms ({} attempt(s))\n",
            response.metadata.status_code, response.metadata.timing, response.metadata.attempts
        ));
    }
    md.push('\n');

    // Recommendations
    md.push_str("## Recommendations\n\n");
    if report.recommendations.is_empty() {
        md.push_str("No recommendations, well done.\n\n");
    } else {
        md.push_str("| Priority | Category | Issue | Solution |\n");
        md.push_str("|----------|----------|-------|----------|\n");
        for rec in &report.recommendations {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                rec.priority.as_str(),
                rec.category,
                escape_cell(&rec.issue),
                escape_cell(&rec.solution)
            ));
        }
        md.push('\n');
    }

    // Metadata
    md.push_str("## Metadata\n\n");
    md.push_str(&format!(
        "- **Title**: {} ({} chars)\n",
        report.metadata.title.content.as_deref().unwrap_or("(none)"),
        report.metadata.title.length
    ));
    md.push_str(&format!(
        "- **Description**: {} ({} chars)\n",
        report
            .metadata
            .description
            .content
            .as_deref()
            .unwrap_or("(none)"),
        report.metadata.description.length
    ));
    if let Some(canonical) = &report.metadata.canonical {
        md.push_str(&format!("- **Canonical**: {}\n", canonical));
    }
    if let Some(robots) = &report.metadata.robots {
        md.push_str(&format!("- **Robots**: {}\n", robots));
    }
    push_issues(
        &mut md,
        report
            .metadata
            .title
            .issues
            .iter()
            .chain(&report.metadata.description.issues),
    );

    // Headings
    let headings = &report.headings;
    md.push_str("## Headings\n\n");
    md.push_str("| Level | Count |\n");
    md.push_str("|-------|-------|\n");
    for (level, list) in [
        ("H1", &headings.h1),
        ("H2", &headings.h2),
        ("H3", &headings.h3),
        ("H4", &headings.h4),
        ("H5", &headings.h5),
        ("H6", &headings.h6),
    ] {
        md.push_str(&format!("| {} | {} |\n", level, list.len()));
    }
    md.push('\n');
    push_issues(&mut md, headings.issues.iter());

    if let Some(links) = &report.links {
        md.push_str("## Links\n\n");
        md.push_str(&format!("- **Total**: {}\n", links.total));
        md.push_str(&format!("- **Internal**: {}\n", links.internal.len()));
        md.push_str(&format!("- **External**: {}\n", links.external.len()));
        md.push_str(&format!("- **Social**: {}\n", links.social.len()));
        md.push_str(&format!("- **Broken**: {}\n", links.broken.len()));
        md.push_str(&format!(
            "- **Rel**: {} nofollow, {} sponsored, {} ugc\n",
            links.nofollow, links.sponsored, links.ugc
        ));
        push_issues(&mut md, links.issues.iter());
    }

    if let Some(images) = &report.images {
        md.push_str("## Images\n\n");
        md.push_str(&format!("- **Total**: {}\n", images.total));
        md.push_str(&format!("- **With alt text**: {}\n", images.with_alt));
        md.push_str(&format!(
            "- **Missing alt text**: {}\n",
            images.without_alt.len()
        ));
        push_issues(&mut md, images.issues.iter());
    }

    if let Some(performance) = &report.performance {
        md.push_str("## Performance\n\n");
        md.push_str(&format!(
            "- **Scripts**: {} ({} deferred, {} async)\n",
            performance.total_scripts, performance.deferred_scripts, performance.async_scripts
        ));
        md.push_str(&format!("- **Stylesheets**: {}\n", performance.total_styles));
        md.push_str(&format!(
            "- **Resource hints**: {} preload, {} preconnect, {} prefetch\n",
            performance.preload.len(),
            performance.preconnect.len(),
            performance.prefetch.len()
        ));
        push_issues(&mut md, performance.issues.iter());
    }

    md.push_str("## Security\n\n");
    md.push_str(&format!("- **HTTPS**: {}\n", yes_no(report.security.https)));
    push_issues(&mut md, report.security.issues.iter());

    let technical = &report.technical;
    md.push_str("## Technical\n\n");
    md.push_str(&format!("- **DOCTYPE**: {}\n", yes_no(technical.doctype)));
    md.push_str(&format!(
        "- **Charset**: {}\n",
        technical.charset.as_deref().unwrap_or("(none)")
    ));
    md.push_str(&format!(
        "- **Language**: {}\n",
        technical.language.as_deref().unwrap_or("(none)")
    ));
    md.push_str(&format!(
        "- **Viewport**: {}\n",
        technical.viewport.as_deref().unwrap_or("(none)")
    ));
    push_issues(&mut md, technical.issues.iter());

    let accessibility = &report.accessibility;
    md.push_str("## Accessibility\n\n");
    md.push_str(&format!(
        "- **ARIA elements**: {}\n",
        accessibility.aria_elements
    ));
    md.push_str(&format!(
        "- **Skip links**: {}\n",
        yes_no(accessibility.skip_links)
    ));
    md.push_str(&format!(
        "- **Labelled inputs**: {}/{}\n",
        accessibility.form_labels, accessibility.form_inputs
    ));
    push_issues(&mut md, accessibility.issues.iter());

    md.push_str("## Structured Data\n\n");
    md.push_str(&format!(
        "- **JSON-LD blocks**: {}\n",
        report.structured_data.blocks
    ));
    if !report.structured_data.types.is_empty() {
        md.push_str(&format!(
            "- **Types**: {}\n",
            report.structured_data.types.join(", ")
        ));
    }
    push_issues(&mut md, report.structured_data.issues.iter());

    md.push_str("## Mobile\n\n");
    md.push_str(&format!(
        "- **Responsive viewport**: {}\n",
        yes_no(report.mobile.responsive_viewport)
    ));
    md.push_str(&format!(
        "- **Tap targets**: {} ({} too small)\n",
        report.mobile.tap_targets.total,
        report.mobile.tap_targets.small.len()
    ));
    push_issues(&mut md, report.mobile.issues.iter());

    let content = &report.content_quality;
    md.push_str("## Content\n\n");
    md.push_str(&format!("- **Words**: {}\n", content.word_count));
    md.push_str(&format!("- **Paragraphs**: {}\n", content.paragraphs));
    md.push_str(&format!("- **Lists**: {}\n", content.lists));
    md.push_str(&format!("- **Tables**: {}\n", content.tables));
    push_issues(&mut md, content.issues.iter());

    md
}

/// Appends an issue list, or nothing when there are no issues
fn push_issues<'a>(md: &mut String, issues: impl Iterator<Item = &'a String>) {
    let mut any = false;
    for issue in issues {
        if !any {
            md.push_str("\n**Issues:**\n\n");
            any = true;
        }
        md.push_str(&format!("- {}\n", issue));
    }
    md.push('\n');
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Keeps table cells on one line and unbroken by pipes
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisOptions;
    use crate::audit::audit_html;

    fn create_test_response(html: &str, options: AnalysisOptions) -> AuditResponse {
        audit_html(html, "https://example.com/", &options).unwrap()
    }

    #[test]
    fn test_render_markdown_sections() {
        let response = create_test_response(
            "<html><head><title>Short</title></head><body><h1>A</h1><h1>B</h1></body></html>",
            AnalysisOptions::default(),
        );
        let markdown = render_markdown(&response);

        assert!(markdown.contains("# SEO-Lens Report"));
        assert!(markdown.contains("https://example.com/"));
        assert!(markdown.contains(&format!("**Score**: {}/100", response.results.score)));
        assert!(markdown.contains("## Recommendations"));
        assert!(markdown.contains("| High | Metadata |"));
        assert!(markdown.contains("- Multiple H1 headings found"));
        assert!(markdown.contains("## Links"));
        assert!(markdown.contains("## Content"));
    }

    #[test]
    fn test_omitted_sections_not_rendered() {
        let response = create_test_response(
            "<html><body></body></html>",
            AnalysisOptions {
                include_links: false,
                include_images: false,
                include_performance: false,
                ..AnalysisOptions::default()
            },
        );
        let markdown = render_markdown(&response);

        assert!(!markdown.contains("## Links"));
        assert!(!markdown.contains("## Images"));
        assert!(!markdown.contains("## Performance"));
        assert!(markdown.contains("## Security"));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a | b\nc"), "a \\| b c");
    }
}
