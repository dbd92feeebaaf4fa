//! Advancing to the next result page
//!
//! One attempt per page boundary. Every failure mode (control missing,
//! control without a target, navigation error) maps to `false`; the caller
//! treats that as the end of pagination, not as an error.

use tracing::{info, warn};

use super::types::{NEXT_PAGE_SELECTOR, NEXT_PAGE_WAIT};
use crate::driver::{ElementHandle, PageDriver};

/// Try to advance to the next result page. Returns whether navigation
/// happened.
pub async fn advance<D: PageDriver>(driver: &D) -> bool {
    let control = match driver
        .wait_for_clickable(NEXT_PAGE_SELECTOR, NEXT_PAGE_WAIT)
        .await
    {
        Ok(control) => control,
        Err(e) => {
            warn!("next page control not found or not clickable: {}", e);
            return false;
        }
    };

    // Navigate via the control's link target rather than clicking, so an
    // intercepted click cannot strand us mid-transition.
    let href = match control.attribute("href").await {
        Ok(Some(href)) if !href.is_empty() => href,
        Ok(_) => {
            warn!("next page control carries no target");
            return false;
        }
        Err(e) => {
            warn!("could not read next page target: {}", e);
            return false;
        }
    };

    match driver.navigate(&href).await {
        Ok(()) => {
            info!("navigated to next page via href");
            true
        }
        Err(e) => {
            warn!("navigation to next page failed: {}", e);
            false
        }
    }
}
