mod config;
mod errors;
mod llm;
mod models;
mod pipeline;
mod report;
mod scrape;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm::OpenRouterClient;
use crate::models::profile::CandidateProfile;
use crate::pipeline::Orchestrator;
use crate::scrape::PostingFetcher;

/// Analyze a job posting URL against a fixed candidate profile.
#[derive(Debug, Parser)]
#[command(name = "analyzer", version)]
struct Cli {
    /// The full URL of the job posting to analyze.
    job_url: String,

    /// Path to the candidate profile JSON file.
    #[arg(long, default_value = "candidate_profile.json")]
    profile: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first: a missing credential must fail before any
    // network call, and before a report file exists.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting analyzer v{}", env!("CARGO_PKG_VERSION"));

    let profile = CandidateProfile::load(&cli.profile)?;
    info!("Analyzing against candidate: {}", profile.name());

    let llm = OpenRouterClient::new(&config);
    info!("LLM client initialized (model: {})", llm.model());

    let fetcher = PostingFetcher::new();
    let job = fetcher.fetch(&cli.job_url).await;

    let run = Orchestrator::new(&llm, &profile).run(job).await;

    let document = report::assemble(&run, llm.model(), profile.name(), Utc::now());

    println!("\n======== FINAL COMPREHENSIVE REPORT ========\n");
    println!("{document}");

    std::fs::write(report::REPORT_FILENAME, &document)?;
    info!("Report saved to {}", report::REPORT_FILENAME);

    Ok(())
}
