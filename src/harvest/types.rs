//! Data structures and constants for the harvesting core

use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// Constants
// =============================================================================

/// Search entry point
pub const SEARCH_URL: &str = "https://www.google.com";

/// CSS selector for the query input on the entry page
pub const QUERY_BOX_SELECTOR: &str = "#APjFqb";

/// CSS selector for result-heading candidates
///
/// Headings nested directly under a result anchor; broader selectors pull in
/// sidebar and "people also ask" noise.
pub const RESULT_HEADING_SELECTOR: &str = "#rso a > h3";

/// CSS selector for the next-page control
pub const NEXT_PAGE_SELECTOR: &str = "#pnnext";

/// Ceiling for the query-input wait on the entry page
pub const QUERY_BOX_WAIT: Duration = Duration::from_secs(4);

/// Ceiling for the next-page-control wait
pub const NEXT_PAGE_WAIT: Duration = Duration::from_secs(5);

/// Ceiling for the result-headings wait on each page
pub const RESULTS_WAIT: Duration = Duration::from_secs(15);

/// Fallback search term when the caller supplies a blank one
pub const DEFAULT_SEARCH_TERM: &str = "OpenAI";

/// Per-call result quota applied when the caller passes zero
pub const DEFAULT_RESULT_COUNT: usize = 5;

/// URL sentinel for records whose heading has no enclosing anchor
pub const NO_URL_SENTINEL: &str = "no-url-found";

// =============================================================================
// Data Structures
// =============================================================================

/// One harvested search result
///
/// `title` is always non-empty; `url` is either the resolved link target or
/// [`NO_URL_SENTINEL`] when the heading had no enclosing anchor. Immutable
/// once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Result heading text
    pub title: String,

    /// Link target, or [`NO_URL_SENTINEL`]
    pub url: String,
}

impl ResultRecord {
    /// Record with a resolved link target
    #[must_use]
    pub fn with_url(title: String, url: String) -> Self {
        Self { title, url }
    }

    /// Record whose heading carried no enclosing anchor
    #[must_use]
    pub fn without_url(title: String) -> Self {
        Self {
            title,
            url: NO_URL_SENTINEL.to_string(),
        }
    }

    /// Whether the record carries a real link target
    #[must_use]
    pub fn has_url(&self) -> bool {
        self.url != NO_URL_SENTINEL
    }
}

/// Return contract of one page-extraction call
///
/// The accumulator is moved in and moved back out; the extractor is the only
/// writer while it runs.
#[derive(Debug)]
pub struct ExtractionOutcome {
    /// Accumulated records, including everything harvested on this call
    pub records: Vec<ResultRecord>,

    /// Number of records appended by this call
    pub harvested: usize,
}
