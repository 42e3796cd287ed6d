#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mapscout_engine::{
    ControllerError, Document, ElementHandle, FailureKind, HtmlDocument, PageController,
    PageSnapshot, ProgressSink, RunConfig, RunEvent,
};

pub const SEARCH_BASE: &str = "https://maps.test/maps/";

pub fn init_logging() {
    scout_logging::initialize_for_tests();
}

/// Config with every delay zeroed so tests run instantly.
pub fn fast_config(output_dir: &Path) -> RunConfig {
    RunConfig {
        scroll_pause_ms: 0,
        scroll_jitter_ms: 0,
        panel_timeout_ms: 0,
        page_settle_delay_ms: 0,
        search_settle_delay_ms: 0,
        output_directory: output_dir.to_path_buf(),
        search_url: SEARCH_BASE.to_string(),
        ..RunConfig::default()
    }
}

pub fn org_url(slug: &str) -> String {
    format!("https://maps.test/maps/org/{slug}/")
}

/// Results view with the scrollbar thumb and one overlay link per slug.
pub fn results_frame(slugs: &[&str]) -> String {
    let mut html = String::from(
        "<html><body><div class=\"scroll\"><div class=\"scroll__scrollbar-thumb\"></div>",
    );
    for slug in slugs {
        html.push_str(&format!(
            "<a class=\"link-overlay\" href=\"/maps/org/{slug}/?ll=37.6,55.7&z=12\"></a>"
        ));
    }
    html.push_str("</div></body></html>");
    html
}

/// Results view without a scrollable panel.
pub fn empty_results() -> String {
    "<html><body><p>Nothing found</p></body></html>".to_string()
}

#[derive(Debug, Default, Clone)]
pub struct Listing<'a> {
    pub name: Option<&'a str>,
    pub address: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub website: Option<&'a str>,
    pub status: Option<&'a str>,
    pub hours: &'a [&'a str],
}

pub fn listing_page(listing: &Listing<'_>) -> String {
    let mut html = String::from("<html><head>");
    for entry in listing.hours {
        html.push_str(&format!("<meta itemprop=\"openingHours\" content=\"{entry}\">"));
    }
    html.push_str("</head><body>");
    if let Some(name) = listing.name {
        html.push_str(&format!("<h1 class=\"orgpage-header-view__header\">{name}</h1>"));
    }
    if let Some(address) = listing.address {
        html.push_str(&format!(
            "<div class=\"business-contacts-view__address\"><a href=\"#\">{address}</a></div>"
        ));
    }
    if let Some(phone) = listing.phone {
        html.push_str(&format!(
            "<div class=\"orgpage-phones-view__phone-number\">{phone}</div>"
        ));
    }
    if let Some(website) = listing.website {
        html.push_str(&format!(
            "<a class=\"business-urls-view__link\" href=\"https://{website}\">{website}</a>"
        ));
    }
    if let Some(status) = listing.status {
        html.push_str(&format!(
            "<div class=\"business-working-status-view\">{status}</div>"
        ));
    }
    html.push_str("</body></html>");
    html
}

#[derive(Debug, Default)]
pub struct ControllerLog {
    pub navigations: Vec<String>,
    pub snapshots: usize,
    pub scrolls: usize,
    pub released: usize,
    /// Timeout passed to each `locate` call, in call order.
    pub locate_timeouts: Vec<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum View {
    Blank,
    Results { url: String, frame: usize },
    Page { url: String },
}

/// In-memory page controller.
///
/// Search URLs map to a sequence of results frames; each successful scroll
/// advances to the next frame and the last frame repeats once exhausted.
/// Listing URLs map to a single page. Anything else fails with HTTP 404.
#[derive(Default)]
pub struct ScriptedController {
    results: HashMap<String, Vec<String>>,
    pages: HashMap<String, String>,
    view: Option<View>,
    fail_scrolls: bool,
    fail_snapshots_for: Vec<String>,
    log: Arc<Mutex<ControllerLog>>,
}

impl ScriptedController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, search_url: impl Into<String>, frames: Vec<String>) -> Self {
        self.results.insert(search_url.into(), frames);
        self
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    pub fn failing_scrolls(mut self) -> Self {
        self.fail_scrolls = true;
        self
    }

    /// Navigation to `url` succeeds but reading the document fails.
    pub fn failing_snapshot(mut self, url: impl Into<String>) -> Self {
        self.fail_snapshots_for.push(url.into());
        self
    }

    pub fn log(&self) -> Arc<Mutex<ControllerLog>> {
        self.log.clone()
    }

    fn current_html(&self) -> Option<String> {
        match self.view.as_ref()? {
            View::Blank => None,
            View::Results { url, frame } => {
                let frames = self.results.get(url)?;
                let idx = (*frame).min(frames.len().checked_sub(1)?);
                frames.get(idx).cloned()
            }
            View::Page { url } => self.pages.get(url).cloned(),
        }
    }

    fn current_url(&self) -> String {
        match &self.view {
            Some(View::Results { url, .. }) | Some(View::Page { url }) => url.clone(),
            _ => "about:blank".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl PageController for ScriptedController {
    async fn navigate(&mut self, url: &str) -> Result<(), ControllerError> {
        self.log.lock().unwrap().navigations.push(url.to_string());
        if self.results.contains_key(url) {
            self.view = Some(View::Results {
                url: url.to_string(),
                frame: 0,
            });
            Ok(())
        } else if self.pages.contains_key(url) {
            self.view = Some(View::Page {
                url: url.to_string(),
            });
            Ok(())
        } else {
            self.view = Some(View::Blank);
            Err(ControllerError::new(FailureKind::HttpStatus(404), "not scripted"))
        }
    }

    async fn current_document(&mut self) -> Result<PageSnapshot, ControllerError> {
        self.log.lock().unwrap().snapshots += 1;
        let url = self.current_url();
        if self.fail_snapshots_for.contains(&url) {
            return Err(ControllerError::new(FailureKind::Network, "renderer crashed"));
        }
        let html = self
            .current_html()
            .ok_or_else(|| ControllerError::new(FailureKind::NoDocument, "blank page"))?;
        Ok(PageSnapshot::new(url, html))
    }

    async fn locate(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Option<ElementHandle>, ControllerError> {
        self.log.lock().unwrap().locate_timeouts.push(timeout);
        let Some(html) = self.current_html() else {
            return Ok(None);
        };
        let found = matches!(HtmlDocument::parse(&html).select_first(selector), Ok(Some(_)));
        Ok(found.then(|| ElementHandle::new(selector)))
    }

    async fn scroll_gesture(
        &mut self,
        _element: &ElementHandle,
        _offset: i32,
    ) -> Result<(), ControllerError> {
        self.log.lock().unwrap().scrolls += 1;
        if self.fail_scrolls {
            return Err(ControllerError::new(FailureKind::Network, "element not interactable"));
        }
        if let Some(View::Results { frame, .. }) = self.view.as_mut() {
            *frame += 1;
        }
        Ok(())
    }

    async fn release(&mut self) -> Result<(), ControllerError> {
        self.log.lock().unwrap().released += 1;
        self.view = None;
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<RunEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: RunEvent) {
        self.events.lock().unwrap().push(event);
    }
}
