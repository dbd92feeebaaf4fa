//! The cross-page accumulation loop
//!
//! Owns all session state: the record accumulator and the pagination
//! counters. Each iteration extracts with the remaining quota, then either
//! terminates (quota met) or asks the navigator for the next page and
//! terminates on refusal. One extraction attempt per page, one navigation
//! attempt per boundary; a hostile or exhausted page ends the loop instead
//! of being retried.

use tracing::info;

use super::extract;
use super::navigate;
use super::types::ResultRecord;
use crate::driver::PageDriver;

/// Counters for one harvesting session
///
/// `current_page` starts at 1 and increases by exactly one per successful
/// navigation; it never decreases or repeats. After every extraction call,
/// `total_collected` equals the accumulator length.
#[derive(Debug, Clone, Copy)]
pub struct PaginationState {
    pub total_collected: usize,
    pub requested_total: usize,
    pub current_page: u32,
}

impl PaginationState {
    #[must_use]
    pub fn new(requested_total: usize) -> Self {
        Self {
            total_collected: 0,
            requested_total,
            current_page: 1,
        }
    }

    /// Quota still outstanding
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.requested_total.saturating_sub(self.total_collected)
    }

    #[must_use]
    pub fn quota_met(&self) -> bool {
        self.total_collected >= self.requested_total
    }
}

/// Collect up to `requested_total` records, paging forward as needed.
///
/// Always returns the accumulated records, even when short of the request;
/// a shortfall is a graceful outcome the caller observes as a shorter
/// sequence, never an error.
pub async fn run<D: PageDriver>(driver: &D, requested_total: usize) -> Vec<ResultRecord> {
    let requested_total = requested_total.max(1);
    let mut state = PaginationState::new(requested_total);
    let mut records: Vec<ResultRecord> = Vec::new();

    while !state.quota_met() {
        let outcome =
            extract::extract_page(driver, state.remaining(), records, state.current_page).await;
        records = outcome.records;
        state.total_collected += outcome.harvested;
        debug_assert_eq!(state.total_collected, records.len());

        if state.quota_met() {
            info!(
                "quota met: {} of {} results collected",
                state.total_collected, state.requested_total
            );
            break;
        }

        info!(
            "collected {}/{}, going to next page...",
            state.total_collected, state.requested_total
        );
        if !navigate::advance(driver).await {
            info!(
                "next page not available, ending with {}/{} results",
                state.total_collected, state.requested_total
            );
            break;
        }
        state.current_page += 1;
    }

    records
}
