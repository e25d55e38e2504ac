use crate::config::AppConfig;
use crate::model::ScraperError;
use crate::scraper::traits::Fetcher;

use reqwest::blocking::Client;
use std::thread;
use std::time::Duration;
use tracing::debug;

pub struct HttpFetcher {
    client: Client,
    delay: Option<Duration>,
}

impl HttpFetcher {
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| ScraperError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            delay: config.request_delay(),
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScraperError::HttpError(e.to_string()))?;

        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::InvalidResponse(status.as_u16()));
        }

        response.text().map_err(|e| ScraperError::HttpError(e.to_string()))
    }
}
