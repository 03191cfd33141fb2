//! End-to-end analysis of full pages

use crate::fixtures::{good_page, DESCRIPTION, EMPTY_PAGE, TITLE};
use seo_lens::analyzer::Priority;
use seo_lens::{analyze, audit_html, AnalysisOptions, AnalysisReport};

const URL: &str = "https://example.com/";

fn report(html: &str) -> AnalysisReport {
    analyze(html, URL, &AnalysisOptions::default()).expect("analysis should succeed")
}

#[test]
fn test_good_page_scores_full_marks() {
    let report = report(&good_page(r#"rel="nofollow""#));

    assert_eq!(report.metadata.title.content.as_deref(), Some(TITLE));
    assert_eq!(report.metadata.description.content.as_deref(), Some(DESCRIPTION));
    assert!(report.metadata.title.issues.is_empty());
    assert!(report.metadata.description.issues.is_empty());
    assert!(report.headings.issues.is_empty());
    assert!(report.technical.issues.is_empty());
    assert!(report.accessibility.issues.is_empty());
    assert!(report.images.as_ref().unwrap().issues.is_empty());
    assert!(report.links.as_ref().unwrap().issues.is_empty());
    assert!(report.performance.as_ref().unwrap().issues.is_empty());
    assert!(report.mobile.issues.is_empty());
    assert!(report.content_quality.issues.is_empty());
    assert_eq!(report.structured_data.types, vec!["Organization"]);

    assert!(report.recommendations.is_empty());
    assert_eq!(report.score, 100);
}

#[test]
fn test_empty_page_report() {
    let report = report(EMPTY_PAGE);

    assert_eq!(report.metadata.title.issues, vec!["Missing title tag"]);
    assert_eq!(report.metadata.description.issues, vec!["Missing meta description"]);
    assert_eq!(report.headings.issues, vec!["Missing H1 heading"]);
    assert_eq!(report.technical.issues.len(), 4);

    let categories: Vec<_> = report
        .recommendations
        .iter()
        .map(|r| (r.category.as_str(), r.priority))
        .collect();
    assert_eq!(
        categories,
        vec![
            ("Metadata", Priority::High),
            ("Metadata", Priority::High),
            ("Content Structure", Priority::Medium),
            ("Technical SEO", Priority::High),
        ]
    );

    // title 5, description 5, H1 5, four technical 20, skip link 2
    assert_eq!(report.score, 63);
}

#[test]
fn test_analysis_is_deterministic() {
    let html = good_page("");
    let mut first = report(&html);
    let second = report(&html);

    first.timestamp = second.timestamp;
    assert_eq!(first, second);
}

#[test]
fn test_missing_nofollow_flagged_but_not_scored() {
    let report = report(&good_page(""));
    let links = report.links.as_ref().unwrap();

    assert_eq!(links.external.len(), 1);
    assert_eq!(links.nofollow, 0);
    assert_eq!(
        links.issues,
        vec!["External links without nofollow attributes"]
    );
    assert_eq!(report.score, 100);
}

#[test]
fn test_internal_and_external_links_split() {
    let report = report(&good_page(r#"rel="nofollow sponsored""#));
    let links = report.links.as_ref().unwrap();

    // skip link, shop and about resolve to the page host
    assert_eq!(links.internal.len(), 3);
    assert_eq!(links.external.len(), 1);
    assert_eq!(links.total, 4);
    assert_eq!(links.nofollow, 1);
    assert_eq!(links.sponsored, 1);
}

#[test]
fn test_plain_http_page_reports_security_issue() {
    let report = analyze(
        &good_page(r#"rel="nofollow""#),
        "http://example.com/",
        &AnalysisOptions::default(),
    )
    .unwrap();

    assert!(!report.security.https);
    assert_eq!(report.security.issues, vec!["Site not served over HTTPS"]);
    assert_eq!(report.score, 100);
}

#[test]
fn test_image_problems_cost_points() {
    let html = good_page(r#"rel="nofollow""#).replace(
        r#"<img src="/mug.jpg" alt="Blue glazed mug" width="400" height="300">"#,
        r#"<img src="/mug.jpg">"#,
    );
    let report = report(&html);
    let images = report.images.as_ref().unwrap();

    assert_eq!(
        images.issues,
        vec!["Image missing dimensions: /mug.jpg", "1 images missing alt text"]
    );
    assert_eq!(report.score, 96);
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].category, "Images");
    assert_eq!(
        report.recommendations[0].issue,
        "Image missing dimensions: /mug.jpg, 1 images missing alt text"
    );
}

#[test]
fn test_skipped_heading_level() {
    let html = good_page(r#"rel="nofollow""#).replace("<h3>Care</h3>", "<h5>Care</h5>");
    let report = report(&html);

    assert_eq!(
        report.headings.issues,
        vec!["Skipped heading level: from H2 to H5"]
    );
    assert_eq!(report.score, 98);
}

#[test]
fn test_broken_structured_data_reported() {
    let html = good_page(r#"rel="nofollow""#).replace(
        r#""name": "Example Pottery"}"#,
        r#""name": "Example Pottery",}"#,
    );
    let report = report(&html);

    assert!(report.structured_data.types.is_empty());
    assert_eq!(
        report.structured_data.issues,
        vec!["Invalid JSON-LD structured data"]
    );
}

#[test]
fn test_score_always_in_range() {
    let pages = [
        EMPTY_PAGE.to_string(),
        good_page(""),
        "<title>x</title><title>y</title><h1>a</h1><h1>b</h1><h4>c</h4>".repeat(20),
        format!("<html><body>{}</body></html>", "<img src=x>".repeat(60)),
    ];

    for page in &pages {
        let report = report(page);
        assert!(report.score <= 100);
    }

    let worst = report(&pages[3]);
    assert_eq!(worst.score, 0);
}

#[test]
fn test_local_audit_json_envelope() {
    let response = audit_html(
        &good_page(r#"rel="nofollow""#),
        "example.com",
        &AnalysisOptions {
            include_performance: false,
            ..AnalysisOptions::default()
        },
    )
    .unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["url"], URL);
    assert_eq!(json["results"]["score"], 100);
    assert!(json["results"].get("performance").is_none());
    assert!(json["results"]["metadata"]["openGraph"].is_object());
    assert!(json["results"]["contentQuality"]["wordCount"].as_u64().unwrap() >= 300);
}
