//! Quota-driven harvesting of search results across paginated pages
//!
//! The core control loop of the crate: submit a query once, then repeatedly
//! query the live page for result headings, project each into a record or a
//! typed absence, and page forward until the requested quota is met or
//! pagination runs out. Everything below the session entry point degrades
//! to an empty/zero/false outcome instead of erroring; partial results
//! always beat a raised failure.

pub mod extract;
pub mod navigate;
pub mod paginate;
pub mod project;
pub mod submit;
pub mod types;

pub use extract::extract_page;
pub use paginate::PaginationState;
pub use project::{Projection, SkipReason};
pub use types::{
    DEFAULT_RESULT_COUNT, DEFAULT_SEARCH_TERM, ExtractionOutcome, NO_URL_SENTINEL,
    NEXT_PAGE_SELECTOR, QUERY_BOX_SELECTOR, RESULT_HEADING_SELECTOR, ResultRecord, SEARCH_URL,
};

use thiserror::Error;
use tracing::info;

use crate::driver::PageDriver;

/// Session-level failures of [`collect_results`]
///
/// Everything transient is absorbed below this boundary; the only way the
/// session itself fails is the entry point being unreachable.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The search entry page could not be reached or its query input could
    /// not be driven; no extraction was attempted.
    #[error("search entry point unreachable")]
    SearchUnreachable,
}

/// Run one complete harvesting session: submit `term`, then collect up to
/// `requested_total` records across result pages.
///
/// The returned sequence is insertion-ordered and may be shorter than
/// `requested_total` when pagination is exhausted first; the caller reads
/// the shortfall off the sequence length. `requested_total` is clamped to a
/// minimum of 1.
///
/// # Errors
/// [`HarvestError::SearchUnreachable`] when the query cannot be submitted.
pub async fn collect_results<D: PageDriver>(
    driver: &D,
    term: &str,
    requested_total: usize,
) -> Result<Vec<ResultRecord>, HarvestError> {
    if !submit::submit_query(driver, term).await {
        return Err(HarvestError::SearchUnreachable);
    }

    let records = paginate::run(driver, requested_total).await;
    info!(
        "session complete: {} of {} requested results",
        records.len(),
        requested_total.max(1)
    );
    Ok(records)
}
