//! Configuration module for SEO-Lens
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use seo_lens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seo-lens.toml")).unwrap();
//! println!("Provider endpoint: {}", config.provider.endpoint);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ProviderConfig, RateLimitConfig, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
