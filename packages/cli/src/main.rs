#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the festival agenda scraper.
//!
//! With no arguments, fetches the partyflock festival agenda and writes
//! `festivals.json` in the working directory.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use festiscrape_cli::RunOptions;
use festiscrape_export::DEFAULT_OUTPUT;
use festiscrape_scraper::layout::PageLayout;
use festiscrape_scraper::{AGENDA_URL, BROWSER_USER_AGENT, ScrapeConfig};

#[derive(Parser)]
#[command(name = "festiscrape", about = "Festival agenda scraper")]
struct Cli {
    /// Agenda page to fetch
    #[arg(long, default_value = AGENDA_URL)]
    url: String,
    /// JSON file to write (overwritten if it exists)
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Extract from a saved copy of the page instead of fetching `--url`
    #[arg(long)]
    html_file: Option<PathBuf>,
    /// `User-Agent` header sent with the request
    #[arg(long, default_value = BROWSER_USER_AGENT)]
    user_agent: String,
    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(long, default_value = "30")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = ScrapeConfig::new(&cli.url).with_header("User-Agent", &cli.user_agent);
    if cli.timeout_secs > 0 {
        config = config.with_timeout(Duration::from_secs(cli.timeout_secs));
    }

    let options = RunOptions {
        config,
        html_file: cli.html_file,
        output: cli.output,
        layout: PageLayout::agenda(),
    };

    let summary = festiscrape_cli::run(&options).await?;
    println!("{summary}");

    Ok(())
}
