//! Retry logic around the rendering provider
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | No response (network failure) | Retry |
//! | HTTP 429 | Retry |
//! | HTTP 5xx | Retry |
//! | Other HTTP 4xx | Fail immediately |
//! | Message mentions timeout, econnrefused, econnreset, epipe, rate limit | Retry |
//! | Anything else | Fail immediately |
//!
//! Client error responses are decided by status alone. Neither their reason
//! phrase nor the body excerpt in [`ProviderError::detail`] is scanned.
//!
//! Backoff is linear: the wait after attempt `n` is `retry_delay * n`.

use crate::fetch::{FetchResult, ProviderError, RenderProvider, ScrapeError, ScrapeOptions};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio_retry::RetryIf;
use url::Url;

/// Message fragments that mark a failure as transient
const RETRYABLE_MESSAGES: &[&str] = &["timeout", "econnrefused", "econnreset", "epipe", "rate limit"];

/// Determines whether a failed attempt should be retried
///
/// # Examples
///
/// ```
/// use seo_lens::fetch::{should_retry, ProviderError};
///
/// assert!(should_retry(&ProviderError::http(503, "Service Unavailable")));
/// assert!(!should_retry(&ProviderError::http(400, "Bad Request")));
/// assert!(!should_retry(&ProviderError::http(408, "Request Timeout")));
/// ```
pub fn should_retry(error: &ProviderError) -> bool {
    match error.status {
        None | Some(429) => return true,
        Some(status) if status >= 500 => return true,
        Some(status) if (400..500).contains(&status) => return false,
        _ => {}
    }

    let message = error.message.to_lowercase();
    RETRYABLE_MESSAGES
        .iter()
        .any(|fragment| message.contains(fragment))
}

/// Waits between attempts: `retry_delay * n` after attempt `n`
///
/// Yields one delay fewer than the number of attempts, so the last failure
/// ends the retry without sleeping.
fn linear_backoff(options: &ScrapeOptions) -> impl Iterator<Item = Duration> {
    let max_attempts = options.max_retries.max(1);
    let base = options.retry_delay;
    (1..max_attempts).map(move |attempt| base * attempt)
}

/// Fetches rendered HTML for `url`, retrying transient failures
///
/// The first successful attempt wins. A non-retryable failure, or the last
/// allowed attempt failing, ends the retry with a [`ScrapeError`] carrying the
/// attempt count and the last failure message.
///
/// # Arguments
///
/// * `provider` - The rendering provider to call
/// * `url` - The page to render
/// * `options` - Attempt limit, backoff base and per-attempt timeout
pub async fn scrape_url<P>(
    provider: &P,
    url: &Url,
    options: &ScrapeOptions,
) -> Result<FetchResult, ScrapeError>
where
    P: RenderProvider + ?Sized,
{
    let max_attempts = options.max_retries.max(1);
    let attempt_count = AtomicU32::new(0);

    let result = RetryIf::spawn(
        linear_backoff(options),
        || {
            let attempt = attempt_count.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::debug!("Fetching {} (attempt {}/{})", url, attempt, max_attempts);
            provider.render(url, options.timeout)
        },
        |err: &ProviderError| {
            let retry = should_retry(err);
            let attempt = attempt_count.load(Ordering::SeqCst);
            if retry && attempt < max_attempts {
                tracing::warn!(
                    "Attempt {} for {} failed ({}), retrying in {:?}",
                    attempt,
                    url,
                    err,
                    options.retry_delay * attempt
                );
            }
            retry
        },
    )
    .await;

    let attempts = attempt_count.load(Ordering::SeqCst);
    match result {
        Ok(mut result) => {
            result.metadata.attempts = attempts;
            tracing::info!(
                "Fetched {} in {}ms (attempt {})",
                url,
                result.metadata.timing,
                attempts
            );
            Ok(result)
        }
        Err(err) => {
            if should_retry(&err) {
                tracing::error!("Giving up on {} after {} attempts: {}", url, attempts, err);
            } else {
                tracing::error!("Non-retryable failure fetching {}: {}", url, err);
            }
            Err(ScrapeError {
                attempts,
                message: err.to_string(),
            })
        }
    }
}
