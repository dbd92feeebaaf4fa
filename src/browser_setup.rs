//! Browser lifecycle management
//!
//! Launches a chromiumoxide Chrome instance with automation-hiding flags and
//! keeps its CDP event handler on a tracked task. The handler MUST be
//! aborted once the browser is gone or it runs forever; [`BrowserWrapper`]
//! owns both and ties their lifetimes together.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Wrapper for a Browser and its event handler task
pub struct BrowserWrapper {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserWrapper {
    /// Get reference to the inner browser
    #[must_use]
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Open a fresh blank tab
    pub async fn new_page(&self) -> Result<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .context("Failed to create blank page")
    }

    /// Close Chrome and stop the event handler
    ///
    /// `wait()` must complete before the handler is aborted so Chrome gets
    /// to release its profile and sockets cleanly.
    pub async fn shutdown(&mut self) -> Result<()> {
        info!("Shutting down browser");
        self.browser
            .close()
            .await
            .context("Failed to close browser")?;
        if let Err(e) = self.browser.wait().await {
            warn!("Browser did not exit cleanly: {}", e);
        }
        self.handler.abort();
        info!("Browser closed successfully");
        Ok(())
    }
}

impl Drop for BrowserWrapper {
    fn drop(&mut self) {
        // Fallback when shutdown() was skipped (panic / early return).
        // Browser::drop kills the Chrome process itself.
        if !self.handler.is_finished() {
            debug!("BrowserWrapper dropped without shutdown, aborting handler task");
            self.handler.abort();
        }
    }
}

/// Launch a Chrome instance configured for search automation
///
/// Carries the automation-hiding arguments the entry page is known to probe
/// for; without `--disable-blink-features=AutomationControlled` the query
/// box frequently never renders.
pub async fn launch_browser(headless: bool) -> Result<BrowserWrapper> {
    info!("Launching Chrome for search automation (headless: {})", headless);

    let headless_mode = if headless {
        HeadlessMode::True
    } else {
        HeadlessMode::False
    };

    let browser_config = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(30))
        .window_size(1920, 1080)
        .headless_mode(headless_mode)
        .arg("--start-maximized")
        .arg("--no-sandbox")
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--disable-infobars")
        .arg("--disable-notifications")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--disable-background-networking")
        .arg("--mute-audio")
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("Failed to launch Chrome")?;

    // Keep the handler on a tracked task so shutdown can stop it.
    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::error!("Browser handler error: {:?}", e);
            }
        }
        debug!("Browser event handler task completed");
    });

    Ok(BrowserWrapper {
        browser,
        handler: handler_task,
    })
}
