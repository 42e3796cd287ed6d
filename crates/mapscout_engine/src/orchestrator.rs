use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use mapscout_core::{output_filename, ListingRecord};
use scout_logging::{clear_scan_label, scout_info, scout_warn, set_scan_label};
use url::Url;

use crate::discovery::{discover, DiscoverySettings};
use crate::extract::{Extraction, ListingExtractor, ScanTarget};
use crate::export::write_records;
use crate::pacing::settle;
use crate::page::PageController;
use crate::{ProgressSink, RunConfig, RunEvent, ScrapeError};

/// What the user asked for: categories × cities, plus the address filter toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub categories: Vec<String>,
    pub cities: Vec<String>,
    pub filter_address: bool,
}

impl RunRequest {
    /// Checks the request and builds one scan target per pair, category outer.
    ///
    /// Every city filter is compiled here so that no pair can fail on it
    /// after earlier pairs have produced records.
    fn scan_targets(&self) -> Result<Vec<ScanTarget>, ScrapeError> {
        if self.categories.is_empty() {
            return Err(ScrapeError::InvalidRequest("no categories given".into()));
        }
        if self.cities.is_empty() {
            return Err(ScrapeError::InvalidRequest("no cities given".into()));
        }
        let mut targets = Vec::with_capacity(self.categories.len() * self.cities.len());
        for category in &self.categories {
            for city in &self.cities {
                targets.push(ScanTarget::new(category, city, self.filter_address)?);
            }
        }
        Ok(targets)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutput {
    Written(PathBuf),
    NoData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Records in pair order (category outer, city inner), then discovery order.
    pub records: Vec<ListingRecord>,
    pub links_collected: usize,
    pub records_skipped: usize,
    pub extraction_failures: usize,
    pub panels_missing: usize,
    pub output: RunOutput,
}

impl RunReport {
    pub fn records_produced(&self) -> usize {
        self.records.len()
    }

    pub fn output_path(&self) -> Result<&Path, ScrapeError> {
        match &self.output {
            RunOutput::Written(path) => Ok(path),
            RunOutput::NoData => Err(ScrapeError::NoDataCollected),
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    records: Vec<ListingRecord>,
    links_collected: usize,
    records_skipped: usize,
    extraction_failures: usize,
    panels_missing: usize,
}

/// Builds the search URL for one pair: `text=<category> <city>` on `base`.
pub fn search_url(base: &str, category: &str, city: &str) -> Result<String, ScrapeError> {
    let query = format!("{category} {city}");
    Url::parse_with_params(base, &[("text", query.as_str())])
        .map(String::from)
        .map_err(|err| ScrapeError::InvalidSearchUrl {
            url: base.to_string(),
            message: err.to_string(),
        })
}

/// Runs the category × city cross-product sequentially over one page controller.
pub struct Orchestrator<S: ProgressSink> {
    config: RunConfig,
    sink: S,
}

impl<S: ProgressSink> Orchestrator<S> {
    pub fn new(config: RunConfig, sink: S) -> Self {
        Self { config, sink }
    }

    /// Scans every pair, releases the controller, then writes the output file.
    ///
    /// The controller is released on every path out of the scan, including
    /// errors. A release failure is logged and never replaces the scan result.
    pub async fn run<C>(
        &self,
        mut controller: C,
        request: &RunRequest,
        run_date: NaiveDate,
    ) -> Result<RunReport, ScrapeError>
    where
        C: PageController,
    {
        let scanned = self.scan_all(&mut controller, request).await;
        if let Err(err) = controller.release().await {
            scout_warn!("Releasing page controller failed: {}", err);
        }
        let tally = scanned?;

        let output = if tally.records.is_empty() {
            scout_info!("No data collected");
            self.sink.emit(RunEvent::NoDataCollected);
            RunOutput::NoData
        } else {
            let filename = output_filename(&request.cities, run_date);
            let path = write_records(&self.config.output_directory, &filename, &tally.records)?;
            scout_info!("Saved {} records to {:?}", tally.records.len(), path);
            self.sink.emit(RunEvent::OutputWritten {
                path: path.clone(),
                records: tally.records.len(),
            });
            RunOutput::Written(path)
        };

        Ok(RunReport {
            records: tally.records,
            links_collected: tally.links_collected,
            records_skipped: tally.records_skipped,
            extraction_failures: tally.extraction_failures,
            panels_missing: tally.panels_missing,
            output,
        })
    }

    async fn scan_all<C>(
        &self,
        controller: &mut C,
        request: &RunRequest,
    ) -> Result<Tally, ScrapeError>
    where
        C: PageController + ?Sized,
    {
        let targets = request.scan_targets()?;
        let discovery = DiscoverySettings::from_config(&self.config);
        let extractor = ListingExtractor::from_config(&self.config);
        let mut tally = Tally::default();

        for target in &targets {
            set_scan_label(format!("{} / {}", target.category, target.city));
            let result = self
                .scan_pair(controller, &discovery, &extractor, target, &mut tally)
                .await;
            clear_scan_label();
            result?;
        }
        Ok(tally)
    }

    async fn scan_pair<C>(
        &self,
        controller: &mut C,
        discovery: &DiscoverySettings,
        extractor: &ListingExtractor,
        target: &ScanTarget,
        tally: &mut Tally,
    ) -> Result<(), ScrapeError>
    where
        C: PageController + ?Sized,
    {
        let (category, city) = (target.category.as_str(), target.city.as_str());
        let url = search_url(&self.config.search_url, category, city)?;
        scout_info!("Searching {}", url);
        self.sink.emit(RunEvent::PairStarted {
            category: category.to_string(),
            city: city.to_string(),
            search_url: url.clone(),
        });

        if let Err(err) = controller.navigate(&url).await {
            // Treated like an absent panel: the pair yields nothing.
            scout_warn!("Search page failed to load: {}", err);
        } else {
            settle(self.config.search_settle_delay()).await;
        }

        let links = match discover(controller, discovery).await {
            Ok(outcome) => outcome.links,
            Err(ScrapeError::PanelNotFound { selector }) => {
                scout_warn!("Results panel {} not found", selector);
                tally.panels_missing += 1;
                self.sink.emit(RunEvent::PanelNotFound {
                    category: category.to_string(),
                    city: city.to_string(),
                });
                Vec::new()
            }
            Err(err) => return Err(err),
        };

        scout_info!("Collected links: {}", links.len());
        tally.links_collected += links.len();
        self.sink.emit(RunEvent::LinksCollected {
            category: category.to_string(),
            city: city.to_string(),
            count: links.len(),
        });
        if links.is_empty() {
            return Ok(());
        }

        let total = links.len();
        for (idx, link) in links.iter().enumerate() {
            scout_info!("[{}/{}] {}", idx + 1, total, link);
            self.sink.emit(RunEvent::ListingVisited {
                index: idx + 1,
                total,
                url: link.clone(),
            });

            match extractor.extract(controller, link, target).await {
                Ok(Extraction::Record(record)) => {
                    self.sink.emit(RunEvent::RecordProduced { url: link.clone() });
                    tally.records.push(record);
                }
                Ok(Extraction::Skipped { address }) => {
                    tally.records_skipped += 1;
                    self.sink.emit(RunEvent::ListingSkipped {
                        url: link.clone(),
                        address,
                    });
                }
                Err(err) => {
                    scout_warn!("{}", err);
                    tally.extraction_failures += 1;
                    self.sink.emit(RunEvent::ListingFailed {
                        url: link.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
