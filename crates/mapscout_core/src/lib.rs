//! Mapscout core: pure listing normalization and output naming.
mod address;
mod filename;
mod hours;
mod record;
mod transliterate;

pub use address::{address_matches, CityMatcher};
pub use filename::{output_filename, MULTI_CITY_STEM, OUTPUT_EXTENSION};
pub use hours::{normalize_hours, DayHours, HoursLocale, Schedule, ALWAYS_OPEN};
pub use record::{normalize_listing_url, ListingRecord, COLUMNS};
pub use transliterate::transliterate;
