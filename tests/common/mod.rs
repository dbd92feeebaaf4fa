//! Scripted driver for exercising the harvesting loop without a browser
//!
//! `MockDriver` plays back a fixed sequence of result pages. Waits resolve
//! immediately: a condition that the scripted page cannot satisfy fails with
//! `Timeout` at once instead of sleeping out the ceiling.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use serp_harvest::driver::{DriverError, DriverResult, ElementHandle, PageDriver};
use serp_harvest::harvest::{
    NEXT_PAGE_SELECTOR, QUERY_BOX_SELECTOR, RESULT_HEADING_SELECTOR, SEARCH_URL,
};

/// One scripted page element
#[derive(Clone, Debug, Default)]
pub struct MockElement {
    pub visible: bool,
    pub text: Option<String>,
    pub href: Option<String>,
    pub detached: bool,
}

impl MockElement {
    /// A normal, visible result heading inside an anchor
    pub fn result(title: &str, url: &str) -> Self {
        Self {
            visible: true,
            text: Some(title.to_string()),
            href: Some(url.to_string()),
            ..Self::default()
        }
    }

    /// A heading that is present in the DOM but not rendered
    pub fn invisible(title: &str) -> Self {
        Self {
            visible: false,
            text: Some(title.to_string()),
            href: Some(format!("https://example.com/{title}")),
            ..Self::default()
        }
    }

    /// A visible heading whose text is blank
    pub fn untitled() -> Self {
        Self {
            visible: true,
            text: Some("   ".to_string()),
            ..Self::default()
        }
    }

    /// A visible heading with no enclosing anchor
    pub fn linkless(title: &str) -> Self {
        Self {
            visible: true,
            text: Some(title.to_string()),
            href: None,
            ..Self::default()
        }
    }

    /// A handle whose every query fails (node detached mid-extraction)
    pub fn detached() -> Self {
        Self {
            detached: true,
            ..Self::default()
        }
    }

    fn control(href: &str) -> Self {
        Self {
            visible: true,
            href: Some(href.to_string()),
            ..Self::default()
        }
    }

    fn guard(&self) -> DriverResult<()> {
        if self.detached {
            Err(DriverError::Lookup("node detached from document".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ElementHandle for MockElement {
    async fn is_visible(&self) -> DriverResult<bool> {
        self.guard()?;
        Ok(self.visible)
    }

    async fn text_content(&self) -> DriverResult<Option<String>> {
        self.guard()?;
        Ok(self.text.clone())
    }

    async fn ancestor_link_href(&self) -> DriverResult<Option<String>> {
        self.guard()?;
        Ok(self.href.clone())
    }

    async fn attribute(&self, name: &str) -> DriverResult<Option<String>> {
        self.guard()?;
        if name == "href" {
            Ok(self.href.clone())
        } else {
            Ok(None)
        }
    }

    async fn send_keys(&self, _text: &str) -> DriverResult<()> {
        self.guard()
    }

    async fn submit(&self) -> DriverResult<()> {
        self.guard()
    }

    async fn click(&self) -> DriverResult<()> {
        self.guard()
    }
}

/// One scripted result page
#[derive(Clone, Debug, Default)]
pub struct MockPage {
    pub headings: Vec<MockElement>,
    pub has_next: bool,
}

impl MockPage {
    pub fn new(headings: Vec<MockElement>) -> Self {
        Self {
            headings,
            has_next: false,
        }
    }

    pub fn with_next(mut self) -> Self {
        self.has_next = true;
        self
    }

    /// A page with `count` ordinary results titled `p<page>-r<n>`
    pub fn of_results(page: usize, count: usize) -> Self {
        Self::new(
            (1..=count)
                .map(|n| {
                    MockElement::result(
                        &format!("p{page}-r{n}"),
                        &format!("https://example.com/p{page}/r{n}"),
                    )
                })
                .collect(),
        )
    }
}

#[derive(Default)]
struct DriverState {
    current: usize,
    navigations: Vec<String>,
    next_lookups: usize,
}

/// Scripted playback of a fixed page sequence
#[derive(Default)]
pub struct MockDriver {
    pages: Vec<MockPage>,
    pub fail_entry: bool,
    pub missing_query_box: bool,
    state: Mutex<DriverState>,
}

impl MockDriver {
    pub fn new(pages: Vec<MockPage>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// 1-based number of the page currently loaded
    pub fn current_page(&self) -> usize {
        self.locked().current + 1
    }

    /// How many times the next-page control was looked up
    pub fn next_lookups(&self) -> usize {
        self.locked().next_lookups
    }

    /// How many successful page advances happened
    pub fn advances(&self) -> usize {
        self.locked()
            .navigations
            .iter()
            .filter(|url| url.starts_with("mock://page/"))
            .count()
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, DriverState> {
        self.state.lock().expect("mock driver state poisoned")
    }

    fn current(&self) -> Option<MockPage> {
        let index = self.locked().current;
        self.pages.get(index).cloned()
    }

    fn timeout(selector: &str, timeout: Duration) -> DriverError {
        DriverError::Timeout {
            selector: selector.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    type Element = MockElement;

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        if self.fail_entry && url == SEARCH_URL {
            return Err(DriverError::Protocol("connection refused".into()));
        }
        let mut state = self.locked();
        if let Some(page) = url.strip_prefix("mock://page/") {
            let number: usize = page.parse().expect("scripted page URL");
            state.current = number - 1;
        }
        state.navigations.push(url.to_string());
        Ok(())
    }

    async fn current_title(&self) -> DriverResult<String> {
        Ok("Mock Search".to_string())
    }

    async fn current_url(&self) -> DriverResult<String> {
        Ok(format!("mock://page/{}", self.current_page()))
    }

    async fn wait_for_visible(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<Self::Element> {
        if selector == QUERY_BOX_SELECTOR && !self.missing_query_box {
            return Ok(MockElement::control("mock://query-box"));
        }
        Err(Self::timeout(selector, timeout))
    }

    async fn wait_for_clickable(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<Self::Element> {
        if selector == NEXT_PAGE_SELECTOR {
            self.locked().next_lookups += 1;
            if let Some(page) = self.current()
                && page.has_next
            {
                let next_page = self.current_page() + 1;
                return Ok(MockElement::control(&format!("mock://page/{next_page}")));
            }
        }
        Err(Self::timeout(selector, timeout))
    }

    async fn wait_for_all(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<Vec<Self::Element>> {
        if selector == RESULT_HEADING_SELECTOR
            && let Some(page) = self.current()
            && !page.headings.is_empty()
        {
            return Ok(page.headings.clone());
        }
        Err(Self::timeout(selector, timeout))
    }
}
