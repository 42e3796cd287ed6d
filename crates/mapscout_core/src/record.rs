/// Column headers of the tabular output, in write order.
pub const COLUMNS: [&str; 8] = [
    "Category",
    "City",
    "Name",
    "Address",
    "Phone",
    "Website",
    "Working Hours",
    "URL",
];

/// One discovered business listing.
///
/// `source_url` is unique within the records produced for a single
/// (category, city) scan. Absent fields stay `None`; they are never filled
/// with empty strings or placeholder text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub category: String,
    pub city: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub working_hours: Option<String>,
    pub source_url: String,
}

impl ListingRecord {
    /// Cells in [`COLUMNS`] order; absent fields become empty cells.
    pub fn to_row(&self) -> Vec<String> {
        let cell = |value: &Option<String>| value.clone().unwrap_or_default();
        vec![
            self.category.clone(),
            self.city.clone(),
            cell(&self.name),
            cell(&self.address),
            cell(&self.phone),
            cell(&self.website),
            cell(&self.working_hours),
            self.source_url.clone(),
        ]
    }
}

/// Strips the query string (and anything after it) from a listing href.
pub fn normalize_listing_url(href: &str) -> &str {
    let trimmed = href.trim();
    match trimmed.split_once('?') {
        Some((base, _)) => base,
        None => trimmed,
    }
}
