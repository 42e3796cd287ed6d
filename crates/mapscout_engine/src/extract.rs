use std::time::Duration;

use mapscout_core::{normalize_hours, CityMatcher, HoursLocale, ListingRecord};
use scout_logging::scout_info;

use crate::pacing::settle;
use crate::page::{Document, PageController, PageSnapshot};
use crate::{DocumentError, RunConfig, ScrapeError, SiteSelectors};

/// The (category, city) pair a listing is extracted for.
#[derive(Debug, Clone)]
pub struct ScanTarget {
    pub category: String,
    pub city: String,
    /// Present when address filtering is enabled for the run.
    pub city_filter: Option<CityMatcher>,
}

impl ScanTarget {
    pub fn new(
        category: impl Into<String>,
        city: impl Into<String>,
        filter_enabled: bool,
    ) -> Result<Self, ScrapeError> {
        let city = city.into();
        let city_filter = if filter_enabled {
            Some(CityMatcher::new(&city).map_err(|err| {
                ScrapeError::InvalidRequest(format!("city `{city}` is not a usable filter: {err}"))
            })?)
        } else {
            None
        };
        Ok(Self {
            category: category.into(),
            city,
            city_filter,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Record(ListingRecord),
    /// The address filter rejected the listing.
    Skipped { address: String },
}

/// Fields read from one listing page, before the address filter applies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingFields {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub working_hours: Option<String>,
}

pub struct ListingExtractor {
    selectors: SiteSelectors,
    hours: HoursLocale,
    settle_delay: Duration,
}

impl ListingExtractor {
    pub fn new(selectors: SiteSelectors, hours: HoursLocale, settle_delay: Duration) -> Self {
        Self {
            selectors,
            hours,
            settle_delay,
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(
            config.selectors.clone(),
            config.hours.clone(),
            config.page_settle_delay(),
        )
    }

    /// Loads `url` and turns it into a record, or a skip when the address
    /// filter rejects it. Any failure is an `ExtractionFailure` for this URL.
    pub async fn extract<C>(
        &self,
        controller: &mut C,
        url: &str,
        target: &ScanTarget,
    ) -> Result<Extraction, ScrapeError>
    where
        C: PageController + ?Sized,
    {
        controller
            .navigate(url)
            .await
            .map_err(|err| ScrapeError::extraction(url, err))?;
        settle(self.settle_delay).await;

        let snapshot = controller
            .current_document()
            .await
            .map_err(|err| ScrapeError::extraction(url, err))?;
        let fields = self
            .read_snapshot(&snapshot)
            .map_err(|err| ScrapeError::extraction(url, err))?;

        if let (Some(filter), Some(address)) = (&target.city_filter, &fields.address) {
            if !filter.matches(address) {
                scout_info!("Skipped (outside {}): {}", target.city, address);
                return Ok(Extraction::Skipped {
                    address: address.clone(),
                });
            }
        }

        Ok(Extraction::Record(ListingRecord {
            category: target.category.clone(),
            city: target.city.clone(),
            name: fields.name,
            address: fields.address,
            phone: fields.phone,
            website: fields.website,
            working_hours: fields.working_hours,
            source_url: url.to_string(),
        }))
    }

    fn read_snapshot(&self, snapshot: &PageSnapshot) -> Result<ListingFields, DocumentError> {
        let doc = snapshot.document();
        read_listing(&doc, &self.selectors, &self.hours)
    }
}

/// Reads the listing fields from a loaded page. Empty text counts as absent.
pub fn read_listing<D: Document + ?Sized>(
    doc: &D,
    selectors: &SiteSelectors,
    hours: &HoursLocale,
) -> Result<ListingFields, DocumentError> {
    let status = first_text(doc, &selectors.working_status)?;
    let entries: Vec<String> = doc
        .select_all(&selectors.opening_hours)?
        .iter()
        .filter_map(|node| node.attribute(&selectors.opening_hours_attribute))
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .collect();
    let working_hours =
        normalize_hours(status.as_deref(), &entries, hours).map(|schedule| schedule.to_string());

    Ok(ListingFields {
        name: first_text(doc, &selectors.name)?,
        address: first_text(doc, &selectors.address)?,
        phone: first_text(doc, &selectors.phone)?,
        website: first_text(doc, &selectors.website)?,
        working_hours,
    })
}

fn first_text<D: Document + ?Sized>(doc: &D, selector: &str) -> Result<Option<String>, DocumentError> {
    Ok(doc
        .select_first(selector)?
        .map(|node| node.text().to_string())
        .filter(|text| !text.is_empty()))
}
