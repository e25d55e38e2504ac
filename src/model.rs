// Core structs: BusinessRecord, PlaceResult, EnrichedRecord
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One winning business in one year, as parsed from its page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BusinessRecord {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub year: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub address: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub category: String,
}

impl BusinessRecord {
    pub const COLUMNS: [&'static str; 9] = [
        "url",
        "year",
        "title",
        "description",
        "address",
        "neighborhood",
        "phone",
        "website",
        "category",
    ];

    /// Cells in `COLUMNS` order.
    pub fn to_row(&self) -> [&str; 9] {
        [
            &self.url,
            &self.year,
            &self.title,
            &self.description,
            &self.address,
            &self.neighborhood,
            &self.phone,
            &self.website,
            &self.category,
        ]
    }
}

/// Fields taken from the top places search result. `PlaceResult::default()`
/// is the "no result" sentinel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceResult {
    pub formatted_address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub types: Option<String>,
    pub id: Option<String>,
    pub place_id: Option<String>,
}

impl PlaceResult {
    pub fn is_sentinel(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: BusinessRecord,
    pub place: PlaceResult,
    pub query: String,
}

impl EnrichedRecord {
    pub const EXTRA_COLUMNS: [&'static str; 8] = [
        "lat", "lng", "name", "rating", "types", "id", "place_id", "query",
    ];

    pub fn to_row(&self) -> Vec<String> {
        let opt_num = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
        let opt_str = |v: &Option<String>| v.clone().unwrap_or_default();

        let mut row: Vec<String> = self.record.to_row().iter().map(|s| s.to_string()).collect();
        row.extend([
            opt_num(self.place.lat),
            opt_num(self.place.lng),
            opt_str(&self.place.name),
            opt_num(self.place.rating),
            opt_str(&self.place.types),
            opt_str(&self.place.id),
            opt_str(&self.place.place_id),
            self.query.clone(),
        ]);
        row
    }
}

/// Kind of page held in the local cache. Decides how the cache key is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Business,
    Category,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKind::Business => f.write_str("business"),
            PageKind::Category => f.write_str("category"),
        }
    }
}

/// Outcome of parsing a page that was expected to describe one business.
#[derive(Debug, Clone, PartialEq)]
pub enum BusinessPage {
    Record(BusinessRecord),
    /// A paginated award listing (`.../page/N/`), not a business.
    Listing(String),
}

#[derive(Debug)]
pub struct ParseFailure {
    pub path: PathBuf,
    pub reason: ParserError,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("http error: {0}")]
    HttpError(String),
    #[error("invalid response status {0}")]
    InvalidResponse(u16),
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum ParserError {
    #[error("bad selector: {0}")]
    HtmlParseError(String),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("expected 4 comma-separated meta fields, found {0}")]
    MetaFieldCount(usize),
    #[error("url has no year segment: {0}")]
    UrlShape(String),
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Scraper(#[from] ScraperError),
    #[error("failed to read cached page: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parser(#[from] ParserError),
}

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error(transparent)]
    Scraper(#[from] ScraperError),
    #[error("bad places response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("places api status {0}")]
    Api(String),
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no {0} env variable set")]
    MissingApiKey(String),
}
