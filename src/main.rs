//! SEO-Lens main entry point
//!
//! This is the command-line interface for the SEO-Lens page auditor.

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use seo_lens::audit::audit_html;
use seo_lens::config::{load_config, Config};
use seo_lens::fetch::{build_http_client, HttpRenderProvider};
use seo_lens::output::{render_json, render_markdown, write_report};
use seo_lens::{AnalysisOptions, AnalysisRequest, AuditResponse, Auditor, RateLimiter, SeoError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use url::Url;

/// SEO-Lens: a single-page technical SEO auditor
///
/// SEO-Lens fetches a page's rendered HTML through a rendering provider,
/// analyzes its metadata, structure, links, images and technical setup,
/// and prints a scored report with prioritized recommendations.
#[derive(Parser, Debug)]
#[command(name = "seo-lens")]
#[command(version)]
#[command(about = "A single-page technical SEO auditor", long_about = None)]
struct Cli {
    /// Page to audit (scheme optional, https assumed)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Analyze a local HTML file instead of fetching the page
    #[arg(long, value_name = "FILE")]
    html_file: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Leave the image inventory out of the report
    #[arg(long)]
    no_images: bool,

    /// Leave the link inventory out of the report
    #[arg(long)]
    no_links: bool,

    /// Leave performance heuristics out of the report
    #[arg(long)]
    no_performance: bool,

    /// Fetch timeout in milliseconds (1000-30000)
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Markdown,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let status = e
                .downcast_ref::<SeoError>()
                .map(SeoError::http_status)
                .unwrap_or(500);
            tracing::error!("Audit failed (status {}): {:#}", status, e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so that a report printed to stdout stays parseable.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_lens=info,warn"),
            1 => EnvFilter::new("seo_lens=debug,info"),
            2 => EnvFilter::new("seo_lens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).map_err(SeoError::from)?
        }
        None => Config::default(),
    };

    let options = analysis_options(&cli, &config);

    let response = match &cli.html_file {
        Some(path) => {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            audit_html(&html, &cli.url, &options)?
        }
        None => fetch_and_audit(&cli.url, options, &config).await?,
    };

    let text = match cli.format {
        Format::Json => render_json(&response).map_err(SeoError::from)?,
        Format::Markdown => render_markdown(&response),
    };
    write_report(&text, cli.output.as_deref()).map_err(SeoError::from)?;

    tracing::info!(
        "{} scored {} with {} recommendation(s)",
        response.url,
        response.results.score,
        response.results.recommendations.len()
    );

    Ok(())
}

/// Config file options with command-line overrides applied
fn analysis_options(cli: &Cli, config: &Config) -> AnalysisOptions {
    let mut options = config.analysis;
    if cli.no_images {
        options.include_images = false;
    }
    if cli.no_links {
        options.include_links = false;
    }
    if cli.no_performance {
        options.include_performance = false;
    }
    if let Some(timeout) = cli.timeout {
        options.timeout = timeout;
    }
    options
}

/// Audits `url` through the configured rendering provider
async fn fetch_and_audit(
    url: &str,
    options: AnalysisOptions,
    config: &Config,
) -> anyhow::Result<AuditResponse> {
    let provider_config = &config.provider;
    let api_key = provider_config.resolve_api_key().ok_or_else(|| {
        anyhow!(
            "No provider API key: set {} or provider.api-key in the config file",
            provider_config.api_key_env
        )
    })?;
    let endpoint = Url::parse(&provider_config.endpoint)
        .with_context(|| format!("Invalid provider endpoint '{}'", provider_config.endpoint))?;

    let client = build_http_client().map_err(SeoError::from)?;
    let provider =
        HttpRenderProvider::new(client, endpoint, api_key).with_render_js(provider_config.render_js);

    let auditor = Auditor::new(
        provider,
        provider_config.scrape_options(options.timeout),
        RateLimiter::new(config.rate_limit.max_requests, config.rate_limit.window()),
    );

    let request = AnalysisRequest {
        url: url.to_string(),
        options,
    };
    Ok(auditor.audit(&request).await?)
}
