//! `api-tour`: call a GitHub-style REST API and report what comes back.

mod tour;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tour_core::config::DEFAULT_BASE_URL;
use tour_core::{ClientConfig, HttpClient};
use tracing_subscriber::EnvFilter;

use crate::tour::TourOptions;

#[derive(Debug, Parser)]
#[command(
    name = "api-tour",
    version,
    about = "Walk through a GitHub-style REST API: status codes, JSON bodies, query parameters"
)]
struct Cli {
    /// API root every request is made against
    #[arg(long, env = "API_TOUR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Give up on a request after this many seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Owner of the repository to inspect
    #[arg(long, default_value = "nnja")]
    owner: String,

    /// Repository to inspect
    #[arg(long, default_value = "new-computer")]
    repo: String,

    /// A path that should not exist
    #[arg(long, default_value = "/repositories/doesnt/exist")]
    missing_path: String,

    /// Language to search for
    #[arg(long, default_value = "python")]
    language: String,

    /// How many search results to print
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    top: i64,

    /// Pretty-print the full repository response
    #[arg(long)]
    dump: bool,

    /// Log every request to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl From<&Cli> for TourOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            owner: cli.owner.clone(),
            repo: cli.repo.clone(),
            missing_path: cli.missing_path.clone(),
            language: cli.language.clone(),
            top: cli.top,
            dump: cli.dump,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ClientConfig::new(&cli.base_url).timeout(Duration::from_secs(cli.timeout_secs));
    let client = HttpClient::new(config).context("invalid --base-url")?;

    let mut stdout = io::stdout().lock();
    let failures = tour::run(&client, &TourOptions::from(&cli), &mut stdout);
    stdout.flush()?;

    if failures.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    for failure in &failures {
        eprintln!("error: {failure:#}");
    }
    Ok(ExitCode::FAILURE)
}

// Logs go to stderr so stdout stays the report.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
