// Places text-search client
use crate::model::{EnrichError, PlaceResult};
use crate::scraper::Fetcher;

use serde::Deserialize;
use tracing::info;

pub trait PlaceLookup {
    /// `Ok(None)` when the search returned no results.
    fn lookup(&self, query: &str) -> Result<Option<PlaceResult>, EnrichError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
    name: Option<String>,
    rating: Option<f64>,
    #[serde(default)]
    types: Vec<String>,
    id: Option<String>,
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<Location>,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

impl From<SearchResult> for PlaceResult {
    fn from(r: SearchResult) -> Self {
        let location = r.geometry.and_then(|g| g.location);
        Self {
            formatted_address: r.formatted_address,
            lat: location.as_ref().map(|l| l.lat),
            lng: location.as_ref().map(|l| l.lng),
            name: r.name,
            rating: r.rating,
            types: Some(r.types.join(",")),
            id: r.id,
            place_id: r.place_id,
        }
    }
}

pub struct PlacesClient<F: Fetcher> {
    fetcher: F,
    api_base: String,
    api_key: String,
}

impl<F: Fetcher> PlacesClient<F> {
    pub fn new(fetcher: F, api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            fetcher,
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }

    fn build_url(&self, query: &str) -> String {
        format!(
            "{}json?key={}&query={}",
            self.api_base,
            self.api_key,
            urlencoding::encode(query)
        )
    }
}

impl<F: Fetcher> PlaceLookup for PlacesClient<F> {
    fn lookup(&self, query: &str) -> Result<Option<PlaceResult>, EnrichError> {
        let body = self.fetcher.fetch(&self.build_url(query))?;
        let response: SearchResponse = serde_json::from_str(&body)?;

        match response.status.as_deref() {
            None | Some("OK") | Some("ZERO_RESULTS") => {}
            Some(other) => return Err(EnrichError::Api(other.to_string())),
        }

        match response.results.into_iter().next() {
            Some(top) => Ok(Some(top.into())),
            None => {
                info!("Unable to get result for {}", query);
                Ok(None)
            }
        }
    }
}
