use std::path::PathBuf;
use std::time::Duration;

use mapscout_core::HoursLocale;
use serde::{Deserialize, Serialize};

/// Run-wide settings handed to the orchestrator at construction.
///
/// Durations are kept in milliseconds so the file format stays flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Base pause after each scroll gesture.
    pub scroll_pause_ms: u64,
    /// Upper bound of the random extra pause added to `scroll_pause_ms`.
    pub scroll_jitter_ms: u64,
    /// Consecutive scroll iterations without new links that end discovery.
    pub max_stall_iterations: u32,
    /// Vertical drag offset applied to the scrollbar thumb.
    pub scroll_offset: i32,
    pub panel_timeout_ms: u64,
    /// Wait after opening a listing page.
    pub page_settle_delay_ms: u64,
    /// Wait after opening a search results page.
    pub search_settle_delay_ms: u64,
    pub output_directory: PathBuf,
    pub search_url: String,
    pub selectors: SiteSelectors,
    pub hours: HoursLocale,
    pub http: HttpSettings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scroll_pause_ms: 1_200,
            scroll_jitter_ms: 400,
            max_stall_iterations: 5,
            scroll_offset: 160,
            panel_timeout_ms: 10_000,
            page_settle_delay_ms: 2_000,
            search_settle_delay_ms: 6_000,
            output_directory: PathBuf::from("yandex_result"),
            search_url: "https://yandex.ru/maps/".to_string(),
            selectors: SiteSelectors::default(),
            hours: HoursLocale::default(),
            http: HttpSettings::default(),
        }
    }
}

impl RunConfig {
    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    pub fn scroll_jitter(&self) -> Duration {
        Duration::from_millis(self.scroll_jitter_ms)
    }

    pub fn panel_timeout(&self) -> Duration {
        Duration::from_millis(self.panel_timeout_ms)
    }

    pub fn page_settle_delay(&self) -> Duration {
        Duration::from_millis(self.page_settle_delay_ms)
    }

    pub fn search_settle_delay(&self) -> Duration {
        Duration::from_millis(self.search_settle_delay_ms)
    }
}

/// CSS selectors for the results panel and listing pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    /// Scrollbar thumb of the results panel; the drag target.
    pub results_panel: String,
    pub listing_link: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    /// Free-text operating status label.
    pub working_status: String,
    /// Structured opening-hours entries, read from `opening_hours_attribute`.
    pub opening_hours: String,
    pub opening_hours_attribute: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            results_panel: ".scroll__scrollbar-thumb".to_string(),
            listing_link: "a.link-overlay[href*='/org/']".to_string(),
            name: "h1".to_string(),
            address: "div.business-contacts-view__address a".to_string(),
            phone: "div.orgpage-phones-view__phone-number".to_string(),
            website: "a.business-urls-view__link".to_string(),
            working_status: "div.business-working-status-view".to_string(),
            opening_hours: "meta[itemprop='openingHours']".to_string(),
            opening_hours_attribute: "content".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
            user_agent: concat!("mapscout/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
