//! serp-harvest binary: drive one harvesting session end to end
//!
//! Parse flags, set up the log sinks, launch Chrome, run the session, print
//! the summary. The browser is torn down on every exit path; anything the
//! core did not absorb surfaces here, gets reported, and maps to a non-zero
//! exit code.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use serp_harvest::cli::Args;
use serp_harvest::harvest::{self, ResultRecord};
use serp_harvest::{ChromePage, launch_browser, logging};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init(args.clean) {
        eprintln!("Failed to initialize logging: {e:#}");
        std::process::exit(1);
    }

    match run(&args).await {
        Ok(records) => {
            render(&args, &records);
            info!("SUCCESS exiting the program");
        }
        Err(e) => {
            error!("Session failed: {e:#}");
            eprintln!("Session failed: {e:#}");
            info!("FAIL exiting the program");
            std::process::exit(1);
        }
    }
}

async fn run(args: &Args) -> Result<Vec<ResultRecord>> {
    info!(
        "Beginning automated search - query: '{}', requested results: {}",
        args.search, args.result_count
    );

    let mut browser = launch_browser(args.headless).await?;

    // Hold the session outcome so teardown runs on success and failure alike.
    let session = async {
        let page = browser.new_page().await?;
        let driver = ChromePage::new(page);
        harvest::collect_results(&driver, &args.search, args.result_count)
            .await
            .context("harvesting session failed")
    }
    .await;

    if let Err(e) = browser.shutdown().await {
        error!("Error closing browser: {e:#}");
    }

    session
}

fn render(args: &Args, records: &[ResultRecord]) {
    if args.json {
        match serde_json::to_string_pretty(records) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("Failed to serialize results: {}", e),
        }
        return;
    }

    println!("\nSearch Results Summary:");
    for (i, record) in records.iter().enumerate() {
        println!("{}. {}\n   {}", i + 1, record.title, record.url);
    }
    println!(
        "\nCollected {} of {} requested results",
        records.len(),
        args.result_count.max(1)
    );
}
