//! Transport security checks

use serde::Serialize;
use url::Url;

/// Security section of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SecurityAnalysis {
    pub https: bool,
    pub issues: Vec<String>,
}

/// Checks the transport of the analyzed URL
pub fn analyze_security(url: &Url) -> SecurityAnalysis {
    let https = url.as_str().starts_with("https://");
    let mut issues = Vec::new();
    if !https {
        issues.push("Site not served over HTTPS".to_string());
    }
    SecurityAnalysis { https, issues }
}
