use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub theme_page: PathBuf,
    pub scrape_output: PathBuf,
    pub enrich_input: PathBuf,
    pub enrich_output: PathBuf,
    pub user_agent: String,
    pub request_delay_ms: u64,
    pub timeout_secs: Option<u64>,
    pub places_api_base: String,
    pub api_key_env: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            theme_page: PathBuf::from("data/theme_restaurants.html"),
            scrape_output: PathBuf::from("bob_data.csv"),
            enrich_input: PathBuf::from("bob_data.csv"),
            enrich_output: PathBuf::from("bob_maps.csv"),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) BobScraper/0.1".to_string(),
            request_delay_ms: 0,
            timeout_secs: None,
            places_api_base: "https://maps.googleapis.com/maps/api/place/textsearch/".to_string(),
            api_key_env: "API_KEY".to_string(),
        }
    }
}

impl AppConfig {
    pub fn request_delay(&self) -> Option<Duration> {
        (self.request_delay_ms > 0).then(|| Duration::from_millis(self.request_delay_ms))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Reads the places API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        read_api_key(&self.api_key_env, |name| std::env::var(name).ok())
    }
}

fn read_api_key(
    var: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    match lookup(var) {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingApiKey(var.to_string())),
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Loads `path` when given explicitly. Otherwise the default file is optional.
pub fn resolve_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.is_file() {
                load_config(default)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}
