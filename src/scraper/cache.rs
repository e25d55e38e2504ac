// On-disk page cache keyed by page kind and URL path segments
use crate::model::{PageKind, ScraperError};
use crate::scraper::traits::Fetcher;

use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// A file at the derived path is the only cache-hit signal. Entries are never
/// validated, refreshed or removed.
pub struct PageCache<F: Fetcher> {
    dir: PathBuf,
    fetcher: F,
}

impl<F: Fetcher> PageCache<F> {
    pub fn new(dir: impl Into<PathBuf>, fetcher: F) -> Self {
        Self {
            dir: dir.into(),
            fetcher,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Deterministic cache path for `url`.
    ///
    /// Business pages use the second-to-last `/` segment, category pages the
    /// last and second-to-last. Different URLs that reduce to the same segments
    /// share one entry.
    pub fn path_for(&self, url: &str, kind: PageKind) -> PathBuf {
        let mut segments = url.rsplit('/');
        let last = segments.next().unwrap_or("");
        let second = segments.next().unwrap_or("");

        let name = match kind {
            PageKind::Business => format!("{}_{}.html", kind, second),
            PageKind::Category => format!("{}_{}_{}.html", kind, last, second),
        };
        self.dir.join(name)
    }

    /// Returns the local path for `url`, fetching and saving it first if it is
    /// not on disk yet.
    pub fn fetch_or_cache(&self, url: &str, kind: PageKind) -> Result<PathBuf, ScraperError> {
        let path = self.path_for(url, kind);

        if path.is_file() {
            debug!("cache hit {}", path.display());
            return Ok(path);
        }

        info!("scraping {}", path.display());
        let body = self.fetcher.fetch(url)?;

        fs::create_dir_all(&self.dir)?;
        fs::write(&path, body)?;

        Ok(path)
    }
}
