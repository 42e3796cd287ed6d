use std::collections::HashSet;
use std::time::Duration;

use mapscout_core::normalize_listing_url;
use scout_logging::{scout_debug, scout_info, scout_warn};
use url::Url;

use crate::pacing::polite_pause;
use crate::page::{Document, PageController, PageSnapshot};
use crate::{DocumentError, RunConfig, ScrapeError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverySettings {
    pub panel_selector: String,
    pub link_selector: String,
    pub panel_timeout: Duration,
    pub scroll_offset: i32,
    pub scroll_pause: Duration,
    pub scroll_jitter: Duration,
    pub max_stall_iterations: u32,
}

impl DiscoverySettings {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            panel_selector: config.selectors.results_panel.clone(),
            link_selector: config.selectors.listing_link.clone(),
            panel_timeout: config.panel_timeout(),
            scroll_offset: config.scroll_offset,
            scroll_pause: config.scroll_pause(),
            scroll_jitter: config.scroll_jitter(),
            max_stall_iterations: config.max_stall_iterations,
        }
    }
}

/// Link-collection state for one (category, city) scan.
///
/// `stall_count` is the number of consecutive iterations that added no new
/// link; any iteration that adds one resets it to zero.
#[derive(Debug, Default)]
pub struct DiscoverySession {
    seen: HashSet<String>,
    order: Vec<String>,
    stall_count: u32,
    iterations: u32,
}

impl DiscoverySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one iteration's hrefs and returns how many were new.
    pub fn absorb<I, S>(&mut self, hrefs: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for href in hrefs {
            let clean = normalize_listing_url(href.as_ref());
            if clean.is_empty() || self.seen.contains(clean) {
                continue;
            }
            self.seen.insert(clean.to_string());
            self.order.push(clean.to_string());
            added += 1;
        }

        self.iterations += 1;
        if added == 0 {
            self.stall_count += 1;
        } else {
            self.stall_count = 0;
        }
        added
    }

    pub fn stall_count(&self) -> u32 {
        self.stall_count
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_stalled(&self, threshold: u32) -> bool {
        self.stall_count >= threshold
    }

    pub fn finish(self) -> DiscoveryOutcome {
        DiscoveryOutcome {
            links: self.order,
            iterations: self.iterations,
        }
    }
}

/// Unique listing URLs in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscoveryOutcome {
    pub links: Vec<String>,
    pub iterations: u32,
}

/// Scrolls the results panel until it stops yielding new listing links.
///
/// The only stop condition is `max_stall_iterations` consecutive iterations
/// without a new link; a threshold of zero takes no snapshot at all. Failed scroll gestures and unreadable snapshots are
/// tolerated; they only count toward the stall through their zero-new-link
/// outcome.
pub async fn discover<C>(
    controller: &mut C,
    settings: &DiscoverySettings,
) -> Result<DiscoveryOutcome, ScrapeError>
where
    C: PageController + ?Sized,
{
    let panel = match controller
        .locate(&settings.panel_selector, settings.panel_timeout)
        .await
    {
        Ok(Some(panel)) => panel,
        Ok(None) => {
            return Err(ScrapeError::PanelNotFound {
                selector: settings.panel_selector.clone(),
            })
        }
        Err(err) => {
            scout_warn!("Locating results panel failed: {}", err);
            return Err(ScrapeError::PanelNotFound {
                selector: settings.panel_selector.clone(),
            });
        }
    };

    let mut session = DiscoverySession::new();
    while !session.is_stalled(settings.max_stall_iterations) {
        let hrefs = match controller.current_document().await {
            Ok(snapshot) => match harvest_links(&snapshot, &settings.link_selector) {
                Ok(hrefs) => hrefs,
                Err(err) => {
                    scout_warn!("Listing links unreadable: {}", err);
                    Vec::new()
                }
            },
            Err(err) => {
                scout_warn!("Snapshot failed during discovery: {}", err);
                Vec::new()
            }
        };

        let added = session.absorb(&hrefs);
        scout_debug!(
            "Discovery iteration {}: {} new, {} total, stall {}/{}",
            session.iterations(),
            added,
            session.len(),
            session.stall_count(),
            settings.max_stall_iterations
        );

        if session.is_stalled(settings.max_stall_iterations) {
            break;
        }

        if let Err(err) = controller
            .scroll_gesture(&panel, settings.scroll_offset)
            .await
        {
            scout_debug!("Scroll gesture ignored: {}", err);
        }
        polite_pause(settings.scroll_pause, settings.scroll_jitter).await;
    }

    scout_info!(
        "Discovery finished after {} iterations with {} links",
        session.iterations(),
        session.len()
    );
    Ok(session.finish())
}

/// Listing hrefs in the snapshot, resolved against its URL.
fn harvest_links(snapshot: &PageSnapshot, selector: &str) -> Result<Vec<String>, DocumentError> {
    let base = Url::parse(&snapshot.url).ok();
    let nodes = snapshot.document().select_all(selector)?;
    Ok(nodes
        .iter()
        .filter_map(|node| node.attribute("href"))
        .filter_map(|href| resolve_href(href, base.as_ref()))
        .collect())
}

fn resolve_href(reference: &str, base: Option<&Url>) -> Option<String> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url.into());
    }
    base.and_then(|base| base.join(trimmed).ok()).map(String::from)
}
