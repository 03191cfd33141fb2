//! Integration tests for SEO-Lens
//!
//! Provider tests use wiremock to stand in for the rendering service; report
//! tests run the analysis engine end-to-end on full page fixtures.

mod fixtures;
mod provider_tests;
mod report_tests;
