//! Per-page extraction of result records
//!
//! One call covers one page, one attempt. The accumulator moves in and back
//! out through [`ExtractionOutcome`]; a timeout or query failure returns it
//! untouched with a zero harvest rather than erroring.

use tracing::{error, info};

use super::project::{self, Projection};
use super::types::{
    DEFAULT_RESULT_COUNT, ExtractionOutcome, RESULT_HEADING_SELECTOR, RESULTS_WAIT, ResultRecord,
};
use crate::driver::PageDriver;

/// Extract up to `max_results` records from the current page.
///
/// `max_results` is the remaining quota for this call only; zero falls back
/// to [`DEFAULT_RESULT_COUNT`]. Candidates are examined in document order
/// and iteration stops the moment the quota is met, leaving later candidates
/// unexamined — each page is visited exactly once, so they are never
/// revisited.
///
/// Guarantees `harvested <= max_results` and never errors; element-level
/// failures are absorbed by the projector.
pub async fn extract_page<D: PageDriver>(
    driver: &D,
    max_results: usize,
    records: Vec<ResultRecord>,
    page_number: u32,
) -> ExtractionOutcome {
    let quota = if max_results == 0 {
        DEFAULT_RESULT_COUNT
    } else {
        max_results
    };

    info!("page {}: looking for search results...", page_number);
    let candidates = match driver
        .wait_for_all(RESULT_HEADING_SELECTOR, RESULTS_WAIT)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            // Recoverable: report and hand the accumulator back unchanged.
            error!("page {}: search results not found: {}", page_number, e);
            return ExtractionOutcome {
                records,
                harvested: 0,
            };
        }
    };
    info!(
        "page {}: found {} result headings",
        page_number,
        candidates.len()
    );

    let mut records = records;
    let mut harvested = 0usize;
    for (index, candidate) in candidates.iter().enumerate() {
        if harvested >= quota {
            info!(
                "page {}: quota of {} met, {} candidates left unexamined",
                page_number,
                quota,
                candidates.len() - index
            );
            break;
        }
        match project::project(candidate, page_number, index + 1).await {
            Projection::Record(record) => {
                records.push(record);
                harvested += 1;
            }
            Projection::Absent(_) => {}
        }
    }

    ExtractionOutcome { records, harvested }
}
