mod cli;
mod platform;

use std::io;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use mapscout_engine::{HttpPageController, Orchestrator, RunOutput, RunReport};
use scout_logging::scout_info;

use cli::Cli;
use platform::config::load_run_config;
use platform::logging;
use platform::progress::TerminalProgress;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, logging::level_for(cli.verbose));

    let mut config = load_run_config(cli.config.as_deref())?;
    if let Some(dir) = &cli.output_dir {
        config.output_directory = dir.clone();
    }

    let request = {
        let mut input = io::stdin().lock();
        cli::resolve_request(&cli, &mut input, &mut io::stdout())?
    };
    scout_info!(
        "Run: {} categories x {} cities, address filter {}",
        request.categories.len(),
        request.cities.len(),
        if request.filter_address { "on" } else { "off" }
    );

    let controller = HttpPageController::new(config.http.clone())
        .context("failed to start the page controller")?;
    let orchestrator = Orchestrator::new(config, TerminalProgress);
    let report = orchestrator
        .run(controller, &request, Local::now().date_naive())
        .await?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &RunReport) {
    println!("\nLinks collected: {}", report.links_collected);
    println!("Records produced: {}", report.records_produced());
    println!("Skipped by address filter: {}", report.records_skipped);
    println!("Failed listings: {}", report.extraction_failures);
    if report.panels_missing > 0 {
        println!("Searches without a results panel: {}", report.panels_missing);
    }
    match &report.output {
        RunOutput::Written(path) => println!("Output: {}", path.display()),
        RunOutput::NoData => println!("Output: none"),
    }
}
