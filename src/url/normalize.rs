use crate::url::host::check_host;
use crate::UrlError;
use url::Url;

/// Normalizes a user-supplied target into an absolute HTTP(S) URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; reject empty input
/// 2. Prepend `https://` when the input carries no scheme
/// 3. Parse the URL; reject if malformed
/// 4. Reject schemes other than http and https
/// 5. Reject URLs without a host, and hosts that point at local or
///    private networks
/// 6. Remove fragment (everything after #)
///
/// # Arguments
///
/// * `input` - The raw target string
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - The input cannot be analyzed
///
/// # Examples
///
/// ```
/// use seo_lens::url::normalize_target;
///
/// let url = normalize_target("example.com/page#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_target(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Malformed("URL cannot be empty".to_string()));
    }

    // Step 2: Auto-prepend the protocol
    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    // Step 3: Parse the URL
    let mut url = Url::parse(&candidate).map_err(|e| UrlError::Parse(e.to_string()))?;

    // Step 4: Validate scheme
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    // Step 5: Validate host
    match url.host() {
        Some(host) => check_host(&host)?,
        None => return Err(UrlError::MissingDomain),
    }

    // Step 6: Remove fragment
    url.set_fragment(None);

    Ok(url)
}

/// True when `input` starts with `scheme://`
///
/// A scheme is an ASCII letter followed by letters, digits, `+`, `-` or `.`,
/// so a URL nested in a path or query does not count.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
