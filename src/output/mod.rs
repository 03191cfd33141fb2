//! Output module for rendering audit reports
//!
//! This module handles:
//! - Serializing audits as pretty-printed JSON
//! - Rendering audits as markdown
//! - Writing the rendered text to a file or stdout

mod markdown;

pub use markdown::render_markdown;

use crate::audit::AuditResponse;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Serializes an audit as pretty-printed JSON with camelCase keys
pub fn render_json(response: &AuditResponse) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(response)?)
}

/// Writes rendered text to `path`, or to stdout when no path is given
///
/// # Arguments
///
/// * `text` - The rendered report
/// * `path` - Destination file; created or truncated
pub fn write_report(text: &str, path: Option<&Path>) -> OutputResult<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(text.as_bytes())?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                handle.write_all(b"\n")?;
            }
            handle.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisOptions;
    use crate::audit::audit_html;
    use tempfile::TempDir;

    fn response() -> AuditResponse {
        audit_html(
            "<html><head><title>Example</title></head><body></body></html>",
            "https://example.com/",
            &AnalysisOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_render_json_uses_camel_case() {
        let json = render_json(&response()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["url"], "https://example.com/");
        assert!(value["results"].get("structuredData").is_some());
        assert!(value["results"].get("structured_data").is_none());
        assert!(value["results"]["score"].is_u64());
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.md");

        write_report("# Report\n", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report\n");
    }

    #[test]
    fn test_write_report_bad_path() {
        let result = write_report("x", Some(Path::new("/nonexistent/dir/report.json")));
        assert!(matches!(result, Err(OutputError::Io(_))));
    }
}
