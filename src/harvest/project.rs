//! Element projection: one raw page element to one record or a typed absence
//!
//! The projector is total. Whatever state the element is in (hidden, empty,
//! detached mid-query), it answers with exactly one of `Record` or `Absent`
//! and reports the outcome to the diagnostic sink. No element-level failure
//! crosses this boundary.

use tracing::{debug, info, warn};

use super::types::ResultRecord;
use crate::driver::ElementHandle;

/// Why an element produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Element is not currently rendered; deliberate skip, not an error
    NotVisible,
    /// Element carried no usable heading text
    EmptyTitle,
    /// A driver-level query on the element failed (detached, structure
    /// mismatch)
    LookupError,
}

impl SkipReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NotVisible => "not visible",
            SkipReason::EmptyTitle => "empty title",
            SkipReason::LookupError => "lookup error",
        }
    }
}

/// Outcome of projecting one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// A validated record
    Record(ResultRecord),
    /// A typed absence; the element contributes nothing to the quota
    Absent(SkipReason),
}

/// Project one result-heading element into a record or a typed absence.
///
/// `ordinal` is the element's 1-based position on the page, carried into
/// every diagnostic event alongside `page_number`.
pub async fn project<E: ElementHandle>(element: &E, page_number: u32, ordinal: usize) -> Projection {
    let visible = match element.is_visible().await {
        Ok(visible) => visible,
        Err(e) => return absent(page_number, ordinal, SkipReason::LookupError, Some(&e)),
    };
    if !visible {
        return absent(page_number, ordinal, SkipReason::NotVisible, None);
    }

    let title = match element.text_content().await {
        Ok(text) => text.unwrap_or_default(),
        Err(e) => return absent(page_number, ordinal, SkipReason::LookupError, Some(&e)),
    };
    let title = title.trim();
    if title.is_empty() {
        return absent(page_number, ordinal, SkipReason::EmptyTitle, None);
    }

    // A heading without an enclosing anchor still counts; only its URL is
    // downgraded to the sentinel.
    let record = match element.ancestor_link_href().await {
        Ok(Some(url)) => ResultRecord::with_url(title.to_string(), url),
        Ok(None) => {
            warn!(
                "page {} result {}: no enclosing link for '{}'",
                page_number, ordinal, title
            );
            ResultRecord::without_url(title.to_string())
        }
        Err(e) => return absent(page_number, ordinal, SkipReason::LookupError, Some(&e)),
    };

    info!(
        "page {} result {}: '{}' | {}",
        page_number, ordinal, record.title, record.url
    );
    Projection::Record(record)
}

fn absent(
    page_number: u32,
    ordinal: usize,
    reason: SkipReason,
    error: Option<&crate::driver::DriverError>,
) -> Projection {
    match error {
        Some(e) => warn!(
            "page {} result {}: skipped ({}): {}",
            page_number,
            ordinal,
            reason.as_str(),
            e
        ),
        None => debug!(
            "page {} result {}: skipped ({})",
            page_number,
            ordinal,
            reason.as_str()
        ),
    }
    Projection::Absent(reason)
}
