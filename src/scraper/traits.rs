use crate::model::ScraperError;

/// Blocking GET returning the response body as text.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}
