//! Fixed-window request limiter
//!
//! The limiter is owned by whoever accepts analysis requests and is handed
//! to the [`Auditor`](crate::audit::Auditor) at construction time. Each key
//! (usually the target host or a caller identity) gets its own window.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Returned when a key has used up its window
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Rate limit exceeded for {key}, retry in {retry_after:?}")]
pub struct RateLimitExceeded {
    /// The key that hit its limit
    pub key: String,

    /// Time until the current window closes
    pub retry_after: Duration,
}

/// Per-key request count for the current window
#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// Counts requests per key within fixed time windows
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` per key in every `window`
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Records a request for `key`, failing if its window is exhausted
    pub fn check(&self, key: &str) -> Result<(), RateLimitExceeded> {
        self.check_at(key, Instant::now())
    }

    /// Same as [`check`](Self::check) with an explicit clock reading
    pub fn check_at(&self, key: &str, now: Instant) -> Result<(), RateLimitExceeded> {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Drop windows that have closed so the map does not grow unbounded
        let window = self.window;
        windows.retain(|_, w| now.saturating_duration_since(w.started_at) < window);

        let entry = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if entry.count >= self.max_requests {
            let elapsed = now.saturating_duration_since(entry.started_at);
            tracing::debug!("Rate limit hit for {} ({} requests)", key, entry.count);
            return Err(RateLimitExceeded {
                key: key.to_string(),
                retry_after: self.window.saturating_sub(elapsed),
            });
        }

        entry.count += 1;
        Ok(())
    }
}
