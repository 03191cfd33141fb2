//! URL handling module for SEO-Lens
//!
//! This module turns user-supplied target strings into absolute HTTP(S) URLs
//! and rejects hosts that must never be handed to the rendering provider.

mod host;
mod normalize;

pub use host::check_host;
pub use normalize::normalize_target;

use url::Url;

/// Returns the lowercase host of a URL, if it has one
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_lens::url::host_key;
///
/// let url = Url::parse("https://Blog.Example.com/post").unwrap();
/// assert_eq!(host_key(&url), Some("blog.example.com".to_string()));
/// ```
pub fn host_key(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
