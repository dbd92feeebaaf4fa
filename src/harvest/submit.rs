//! Query submission against the search entry point
//!
//! Runs once per session, before any extraction. Both failure modes (entry
//! page unreachable, query input missing or uninteractable) are reported and
//! collapse to `false`; the session must not proceed to pagination on
//! `false`.

use tracing::{error, info};

use super::types::{DEFAULT_SEARCH_TERM, QUERY_BOX_SELECTOR, QUERY_BOX_WAIT, SEARCH_URL};
use crate::driver::{ElementHandle, PageDriver};

/// Load the search entry point and submit `term`. Returns whether the search
/// results page was reached.
pub async fn submit_query<D: PageDriver>(driver: &D, term: &str) -> bool {
    let term = if term.trim().is_empty() {
        DEFAULT_SEARCH_TERM
    } else {
        term
    };

    if let Err(e) = driver.navigate(SEARCH_URL).await {
        error!("failed to reach search entry point {}: {}", SEARCH_URL, e);
        return false;
    }
    let title = driver.current_title().await.unwrap_or_default();
    let url = driver
        .current_url()
        .await
        .unwrap_or_else(|_| "about:blank".to_string());
    info!("entry page loaded - title: {}, url: {}", title, url);

    let query_box = match driver
        .wait_for_visible(QUERY_BOX_SELECTOR, QUERY_BOX_WAIT)
        .await
    {
        Ok(query_box) => query_box,
        Err(e) => {
            // Structure change on the entry page; nothing downstream can work.
            error!(
                "query box '{}' not found: {} - page structure may have changed",
                QUERY_BOX_SELECTOR, e
            );
            return false;
        }
    };

    if let Err(e) = query_box.send_keys(term).await {
        error!("failed to enter search term: {}", e);
        return false;
    }
    info!("search term '{}' entered", term);

    if let Err(e) = query_box.submit().await {
        error!("failed to submit search: {}", e);
        return false;
    }
    info!("search submitted via Enter key");

    true
}
