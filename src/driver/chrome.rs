//! Chromiumoxide-backed implementation of the driver capabilities
//!
//! Wraps one `chromiumoxide::Page` and maps its operations onto the
//! [`PageDriver`]/[`ElementHandle`] seams. Waits are poll loops with a 100ms
//! interval and an explicit deadline; CDP failures are folded into
//! [`DriverError`] variants so the harvesting core never sees chromiumoxide
//! types.

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::trace;

use super::{DriverError, DriverResult, ElementHandle, PageDriver};

/// Interval between condition checks inside a bounded wait
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// JS predicate evaluated against an element to decide visibility.
/// Mirrors what a user would consider "displayed": attached, not
/// display:none / visibility:hidden, and occupying layout space.
const IS_VISIBLE_FN: &str = "function() {
    if (!this.isConnected) { return false; }
    const style = window.getComputedStyle(this);
    return style.display !== 'none'
        && style.visibility !== 'hidden'
        && this.getClientRects().length > 0;
}";

const TEXT_CONTENT_FN: &str = "function() { return this.textContent; }";

/// Resolves the closest enclosing anchor; `href` (not the raw attribute) so
/// relative targets come back absolutized by the page itself.
const ANCESTOR_HREF_FN: &str = "function() {
    const anchor = this.closest('a');
    return anchor ? anchor.href : null;
}";

fn protocol_err(e: chromiumoxide::error::CdpError) -> DriverError {
    DriverError::Protocol(e.to_string())
}

fn lookup_err(e: chromiumoxide::error::CdpError) -> DriverError {
    DriverError::Lookup(e.to_string())
}

/// A live Chrome tab exposed through the [`PageDriver`] seam
pub struct ChromePage {
    page: Page,
}

impl ChromePage {
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Access the underlying chromiumoxide page
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Poll for a matching element until it is present and visible, or the
    /// deadline passes.
    async fn wait_for_displayed(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<ChromeElement> {
        let start = Instant::now();
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                let handle = ChromeElement { element };
                if handle.is_visible().await.unwrap_or(false) {
                    trace!(
                        "element '{}' ready after {:.2}s",
                        selector,
                        start.elapsed().as_secs_f64()
                    );
                    return Ok(handle);
                }
            }
            if start.elapsed() >= timeout {
                return Err(DriverError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl PageDriver for ChromePage {
    type Element = ChromeElement;

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        self.page.goto(url).await.map_err(protocol_err)?;
        // goto resolves when the HTTP response arrives; wait for the load to
        // settle before callers start querying the DOM.
        self.page
            .wait_for_navigation()
            .await
            .map_err(protocol_err)?;
        Ok(())
    }

    async fn current_title(&self) -> DriverResult<String> {
        Ok(self
            .page
            .get_title()
            .await
            .map_err(protocol_err)?
            .unwrap_or_default())
    }

    async fn current_url(&self) -> DriverResult<String> {
        // "about:blank" over empty string, so logs read unambiguously
        Ok(self
            .page
            .url()
            .await
            .map_err(protocol_err)?
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn wait_for_visible(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<Self::Element> {
        self.wait_for_displayed(selector, timeout).await
    }

    async fn wait_for_clickable(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<Self::Element> {
        // Visibility is the interactability gate that matters for the pages
        // we drive; CDP clicks scroll the target into view themselves.
        self.wait_for_displayed(selector, timeout).await
    }

    async fn wait_for_all(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<Vec<Self::Element>> {
        let start = Instant::now();
        loop {
            match self.page.find_elements(selector).await {
                Ok(elements) if !elements.is_empty() => {
                    trace!(
                        "{} elements matched '{}' after {:.2}s",
                        elements.len(),
                        selector,
                        start.elapsed().as_secs_f64()
                    );
                    return Ok(elements
                        .into_iter()
                        .map(|element| ChromeElement { element })
                        .collect());
                }
                Ok(_) | Err(_) => {}
            }
            if start.elapsed() >= timeout {
                return Err(DriverError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

/// One element handle on a [`ChromePage`]
pub struct ChromeElement {
    element: Element,
}

impl ChromeElement {
    /// Call a JS function with `this` bound to the element and return the
    /// JSON value it produced, if any.
    async fn eval_on_self(&self, function: &str) -> DriverResult<Option<serde_json::Value>> {
        let returned = self
            .element
            .call_js_fn(function, false)
            .await
            .map_err(lookup_err)?;
        Ok(returned.result.value)
    }
}

#[async_trait]
impl ElementHandle for ChromeElement {
    async fn is_visible(&self) -> DriverResult<bool> {
        Ok(self
            .eval_on_self(IS_VISIBLE_FN)
            .await?
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    async fn text_content(&self) -> DriverResult<Option<String>> {
        Ok(self
            .eval_on_self(TEXT_CONTENT_FN)
            .await?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    async fn ancestor_link_href(&self) -> DriverResult<Option<String>> {
        Ok(self
            .eval_on_self(ANCESTOR_HREF_FN)
            .await?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    async fn attribute(&self, name: &str) -> DriverResult<Option<String>> {
        self.element.attribute(name).await.map_err(lookup_err)
    }

    async fn send_keys(&self, text: &str) -> DriverResult<()> {
        self.element.type_str(text).await.map_err(lookup_err)?;
        Ok(())
    }

    async fn submit(&self) -> DriverResult<()> {
        self.element.press_key("Enter").await.map_err(lookup_err)?;
        Ok(())
    }

    async fn click(&self) -> DriverResult<()> {
        self.element.click().await.map_err(lookup_err)?;
        Ok(())
    }
}
