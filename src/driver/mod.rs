//! Capability seams for browser interaction
//!
//! The harvesting core never talks to chromiumoxide directly. It consumes a
//! `PageDriver` (navigation plus bounded element waits) and `ElementHandle`
//! (per-element queries and interactions). The real implementation lives in
//! [`chrome`]; tests script their own.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod chrome;

/// Error types for driver operations
///
/// Every wait carries an explicit ceiling, so a missing element always
/// surfaces as `Timeout` rather than an open-ended hang.
#[derive(Debug, Error)]
pub enum DriverError {
    /// No element matched the selector before the deadline
    #[error("timed out after {timeout:?} waiting for '{selector}'")]
    Timeout { selector: String, timeout: Duration },

    /// Element-level query failed (detached node, structure mismatch)
    #[error("element lookup failed: {0}")]
    Lookup(String),

    /// Browser communication failure
    #[error("driver protocol error: {0}")]
    Protocol(String),
}

/// Result type alias for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// One opaque handle to an element on the current page
///
/// Handles may go stale at any time (the remote page re-renders underneath
/// us); every operation is fallible and callers must tolerate `Lookup`
/// errors on elements they obtained moments earlier.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// Whether the element is currently rendered and visible
    async fn is_visible(&self) -> DriverResult<bool>;

    /// Raw text content of the element, `None` when the node carries none
    async fn text_content(&self) -> DriverResult<Option<String>>;

    /// Resolve the closest enclosing anchor and return its link target
    ///
    /// `Ok(None)` means the element has no anchor ancestor, which is a
    /// structural fact about the page, not a failure.
    async fn ancestor_link_href(&self) -> DriverResult<Option<String>>;

    /// Read an attribute value, `None` when the attribute is absent
    async fn attribute(&self, name: &str) -> DriverResult<Option<String>>;

    /// Type text into the element
    async fn send_keys(&self, text: &str) -> DriverResult<()>;

    /// Trigger the element's native submit affordance (Enter key)
    async fn submit(&self) -> DriverResult<()>;

    /// Click the element
    async fn click(&self) -> DriverResult<()>;
}

/// Driver capability over one live page
///
/// All waits are poll-until-condition-or-deadline with the caller-supplied
/// ceiling; none retries past its deadline. Exactly one component acts on
/// the driver at a time, so `&self` methods suffice.
#[async_trait]
pub trait PageDriver: Send + Sync {
    type Element: ElementHandle;

    /// Navigate the page to `url` and wait for the load to settle
    async fn navigate(&self, url: &str) -> DriverResult<()>;

    /// Title of the currently loaded document
    async fn current_title(&self) -> DriverResult<String>;

    /// URL of the currently loaded document
    async fn current_url(&self) -> DriverResult<String>;

    /// Wait until an element matching `selector` is present and visible
    async fn wait_for_visible(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<Self::Element>;

    /// Wait until an element matching `selector` is interactable
    async fn wait_for_clickable(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<Self::Element>;

    /// Wait until at least one element matches `selector`, then return all
    /// matches in document order
    async fn wait_for_all(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<Vec<Self::Element>>;
}
