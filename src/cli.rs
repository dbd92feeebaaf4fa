//! Command-line flags for the harvesting binary

use clap::Parser;

use crate::harvest::{DEFAULT_RESULT_COUNT, DEFAULT_SEARCH_TERM};

#[derive(Parser, Debug)]
#[command(
    name = "serp-harvest",
    version,
    about = "Automated search-result harvesting across paginated result pages"
)]
pub struct Args {
    /// Search term to submit
    #[arg(short, long, default_value = DEFAULT_SEARCH_TERM)]
    pub search: String,

    /// Maximum number of results to collect
    #[arg(short = 'r', long, default_value_t = DEFAULT_RESULT_COUNT)]
    pub result_count: usize,

    /// Clear the existing log file before starting
    #[arg(short, long)]
    pub clean: bool,

    /// Emit collected results as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Run the browser headless
    #[arg(long)]
    pub headless: bool,
}
