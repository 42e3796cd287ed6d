//! Mapscout engine: page capabilities, discovery, extraction and run orchestration.
mod config;
mod decode;
mod discovery;
mod events;
mod export;
mod extract;
mod http;
mod orchestrator;
mod pacing;
mod page;
mod persist;
mod types;

pub use config::{HttpSettings, RunConfig, SiteSelectors};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use discovery::{discover, DiscoveryOutcome, DiscoverySession, DiscoverySettings};
pub use events::{ProgressSink, RunEvent};
pub use export::{render_csv, write_records, ExportError};
pub use extract::{read_listing, Extraction, ListingExtractor, ListingFields, ScanTarget};
pub use http::HttpPageController;
pub use orchestrator::{search_url, Orchestrator, RunOutput, RunReport, RunRequest};
pub use page::{Document, DocumentError, ElementHandle, HtmlDocument, Node, PageController, PageSnapshot};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{ControllerError, FailureKind, ScrapeError};
