//! Web-Scraper main entry point
//!
//! This is the command-line interface for the Web-Scraper.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use web_scraper::config::{load_config, Config};
use web_scraper::scrape::{ScrapeRequest, WebScraper};
use web_scraper::server::Server;

/// Web-Scraper: fetch a page and extract its content
///
/// Scrapes one URL, optionally scoped by a CSS selector, and reports the
/// result as a `{success, data|error}` JSON envelope.
#[derive(Parser, Debug)]
#[command(name = "web-scraper")]
#[command(version)]
#[command(about = "Fetch a web page and extract its content", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape a single URL and print the envelope
    Scrape {
        /// The URL of the website to scrape
        url: String,

        /// Optional CSS selector to target specific elements
        #[arg(short, long)]
        selector: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Serve line-delimited JSON requests on stdin/stdout
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let scraper = WebScraper::from_config(&config.fetcher).context("Failed to build HTTP client")?;

    match cli.command {
        Command::Scrape {
            url,
            selector,
            pretty,
        } => handle_scrape(&scraper, ScrapeRequest::new(url, selector), pretty).await,
        Command::Serve => {
            handle_serve(scraper, config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only envelopes.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("web_scraper=warn,warn"),
            1 => EnvFilter::new("web_scraper=info,warn"),
            2 => EnvFilter::new("web_scraper=debug,info"),
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

/// Handles the one-shot scrape: prints the envelope, fails the exit code on error
async fn handle_scrape(
    scraper: &WebScraper,
    request: ScrapeRequest,
    pretty: bool,
) -> anyhow::Result<ExitCode> {
    let envelope = scraper.handle(&request).await;

    let output = if pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{}", output);

    if envelope.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Handles serve mode over stdio
async fn handle_serve(scraper: WebScraper, config: Config) -> anyhow::Result<()> {
    let server = Server::new(scraper, config.server);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    server
        .serve(stdin, stdout)
        .await
        .context("Request loop failed")?;

    Ok(())
}
