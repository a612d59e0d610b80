//! The walkthrough: four independent GET requests, each reported as it lands.
//!
//! Every step prints the status code before it looks inside the body, so a
//! step that fails on a missing field has still reported what the server
//! said. A failed step does not stop the ones after it.

use std::io::Write;

use anyhow::{Context, Result};
use tour_core::inspect::extract_u64;
use tour_core::report::{pretty, status_line, top_repos, watchers_line};
use tour_core::{HttpClient, QueryParams, Transport};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct TourOptions {
    pub owner: String,
    pub repo: String,
    /// A path expected to 404.
    pub missing_path: String,
    pub language: String,
    pub top: i64,
    /// Pretty-print the full repository document.
    pub dump: bool,
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            owner: "nnja".to_string(),
            repo: "new-computer".to_string(),
            missing_path: "/repositories/doesnt/exist".to_string(),
            language: "python".to_string(),
            top: 3,
            dump: false,
        }
    }
}

/// Run every step, writing the report to `out`. Returns one error per failed
/// step, in order.
pub fn run<T: Transport>(client: &HttpClient<T>, options: &TourOptions, out: &mut impl Write) -> Vec<anyhow::Error> {
    let results = [
        ("api root", api_root(client, out)),
        ("repository", repository(client, options, out)),
        ("missing resource", missing_resource(client, options, out)),
        ("search", search(client, options, out)),
    ];

    let mut failures = Vec::new();
    for (step, result) in results {
        match result {
            Ok(()) => info!(step, "step completed"),
            Err(e) => {
                error!(step, error = %format!("{e:#}"), "step failed");
                failures.push(e.context(format!("{step} step failed")));
            }
        }
    }
    failures
}

fn api_root<T: Transport>(client: &HttpClient<T>, out: &mut impl Write) -> Result<()> {
    let response = client
        .get_path("", None)
        .with_context(|| format!("requesting the API root at {}", client.config().base_url))?;
    writeln!(out, "{}", status_line("API root", response.status))?;
    Ok(())
}

fn repository<T: Transport>(client: &HttpClient<T>, options: &TourOptions, out: &mut impl Write) -> Result<()> {
    let endpoint = client
        .endpoint("/repos")?
        .segment(options.owner.as_str())?
        .segment(options.repo.as_str())?;
    let response = client
        .get(&endpoint, None)
        .with_context(|| format!("requesting {endpoint}"))?;
    writeln!(out, "{}", status_line("Repos", response.status))?;

    if options.dump {
        writeln!(out, "Repo response data:")?;
        writeln!(out, "{}", pretty(&response.body))?;
    }

    let body = response
        .json()
        .with_context(|| format!("{endpoint} did not return JSON"))?;
    let watchers = extract_u64(body, &["watchers".into()])
        .with_context(|| format!("reading the watcher count from {endpoint}"))?;
    let entity = format!("{}'s {} repository", options.owner, options.repo);
    writeln!(out, "{}", watchers_line(&entity, watchers))?;
    Ok(())
}

fn missing_resource<T: Transport>(client: &HttpClient<T>, options: &TourOptions, out: &mut impl Write) -> Result<()> {
    let response = client
        .get_path(&options.missing_path, None)
        .with_context(|| format!("requesting {}", options.missing_path))?;
    writeln!(out, "{}", status_line("Bad response", response.status))?;
    Ok(())
}

fn search<T: Transport>(client: &HttpClient<T>, options: &TourOptions, out: &mut impl Write) -> Result<()> {
    let endpoint = client.endpoint("/search/repositories")?;
    let params = QueryParams::new()
        .with("q", format!("language:{}", options.language))
        .with("sort", "stars");
    let response = client
        .get(&endpoint, Some(&params))
        .with_context(|| format!("searching {endpoint}"))?;
    writeln!(out, "{}", status_line("Repo search", response.status))?;

    let body = response
        .json()
        .with_context(|| format!("{endpoint} did not return JSON"))?;
    let lines = top_repos(body, options.top).context("formatting the top repositories")?;
    writeln!(
        out,
        "Printing info on top {} {} repos by number of stars.",
        options.top, options.language
    )?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
