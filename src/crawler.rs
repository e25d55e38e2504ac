// Theme -> category -> business crawl
use crate::model::{BusinessPage, BusinessRecord, CrawlError, PageKind, ParseFailure};
use crate::parser::{extract_links, LinkPattern, Parser};
use crate::scraper::{Fetcher, PageCache};

use std::fs;
use tracing::{info, warn};

/// Records parsed during a crawl, plus the pages that did not yield one.
#[derive(Debug, Default)]
pub struct CrawlReport {
    pub records: Vec<BusinessRecord>,
    pub failures: Vec<ParseFailure>,
    pub skipped_listings: Vec<String>,
}

impl CrawlReport {
    pub fn extend(&mut self, other: CrawlReport) {
        self.records.extend(other.records);
        self.failures.extend(other.failures);
        self.skipped_listings.extend(other.skipped_listings);
    }

    pub fn log_summary(&self) {
        info!(
            "Crawl finished: {} records, {} parse failures, {} listing pages skipped",
            self.records.len(),
            self.failures.len(),
            self.skipped_listings.len()
        );
        for failure in &self.failures {
            warn!("  {} -> {}", failure.path.display(), failure.reason);
        }
    }
}

pub struct Crawler<'a, F: Fetcher, P: Parser> {
    cache: &'a PageCache<F>,
    parser: &'a P,
}

impl<'a, F: Fetcher, P: Parser> Crawler<'a, F, P> {
    pub fn new(cache: &'a PageCache<F>, parser: &'a P) -> Self {
        Self { cache, parser }
    }

    /// Fetches (or reuses) every business page linked from a category page and
    /// parses each one. Pages that fail to parse are recorded and skipped; fetch
    /// and I/O errors abort the crawl.
    pub fn crawl_category(&self, category_html: &str) -> Result<CrawlReport, CrawlError> {
        let urls = extract_links(category_html, LinkPattern::YearPage)?;

        let mut paths = Vec::with_capacity(urls.len());
        for url in &urls {
            paths.push(self.cache.fetch_or_cache(url, PageKind::Business)?);
        }

        let mut report = CrawlReport::default();
        for path in paths {
            let html = fs::read_to_string(&path)?;

            match self.parser.parse(&html) {
                Ok(BusinessPage::Record(record)) => {
                    info!("{}", record.url);
                    report.records.push(record);
                }
                Ok(BusinessPage::Listing(url)) => {
                    info!("skipping listing page {}", url);
                    report.skipped_listings.push(url);
                }
                Err(reason) => {
                    warn!("Error: unable to parse {}: {}", path.display(), reason);
                    report.failures.push(ParseFailure { path, reason });
                }
            }
        }

        Ok(report)
    }

    /// Crawls every award category linked from a theme page and concatenates
    /// the results in category order.
    pub fn crawl_theme(&self, theme_html: &str) -> Result<CrawlReport, CrawlError> {
        let category_urls = extract_links(theme_html, LinkPattern::Award)?;
        info!("Found {} category pages", category_urls.len());

        let mut paths = Vec::with_capacity(category_urls.len());
        for url in &category_urls {
            paths.push(self.cache.fetch_or_cache(url, PageKind::Category)?);
        }

        let mut report = CrawlReport::default();
        for path in paths {
            info!("Processing category {}", path.display());
            let category_html = fs::read_to_string(&path)?;
            report.extend(self.crawl_category(&category_html)?);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParserError;
    use crate::parser::business::tests::business_html;
    use crate::parser::BobParser;
    use crate::scraper::traits::mock::MockFetcher;
    use std::path::PathBuf;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("bob_crawl_{}", name));
        let _ = fs::remove_dir_all(&p);
        fs::create_dir_all(&p).unwrap();
        p
    }

    const BASE: &str = "https://www.bostonmagazine.com/best-of-boston";

    fn link_page(hrefs: &[String]) -> String {
        let anchors: String = hrefs.iter().map(|h| format!(r#"<a href="{h}">x</a>"#)).collect();
        format!("<html><body>{anchors}</body></html>")
    }

    fn two_category_site() -> (String, MockFetcher) {
        let beer_bar = format!("{BASE}/2017/award/beer-bar");
        let pizza = format!("{BASE}/2017/award/pizza");
        let hobo = format!("{BASE}/2017/lord-hobo/");
        let regina = format!("{BASE}/2016/regina-pizzeria/");

        let theme = link_page(&[beer_bar.clone(), pizza.clone(), beer_bar.clone()]);
        let fetcher = MockFetcher::new()
            .with_page(&beer_bar, &link_page(&[hobo.clone()]))
            .with_page(&pizza, &link_page(&[regina.clone()]))
            .with_page(&hobo, &business_html(&hobo, "Lord Hobo", "92 Hampshire St., Cambridge, 617-250-8454, lordhobo.com"))
            .with_page(&regina, &business_html(&regina, "Regina Pizzeria", "11 1/2 Thacher St., North End, 617-227-0765, pizzeriaregina.com"));
        (theme, fetcher)
    }

    #[test]
    fn theme_with_two_categories_yields_two_rows() {
        let dir = tmp_dir("theme");
        let (theme, fetcher) = two_category_site();
        let cache = PageCache::new(&dir, fetcher);
        let parser = BobParser::new().unwrap();

        let report = Crawler::new(&cache, &parser).crawl_theme(&theme).unwrap();

        assert_eq!(report.records.len(), 2);
        assert!(report.failures.is_empty());
        assert_eq!(report.records[0].title, "Lord Hobo");
        assert_eq!(report.records[0].year, "2017");
        assert_eq!(report.records[1].title, "Regina Pizzeria");
        assert_eq!(report.records[1].neighborhood, "North End");
        assert_eq!(cache.fetcher().calls(), 4);
    }

    #[test]
    fn rerun_uses_cache_only() {
        let dir = tmp_dir("rerun");
        let (theme, fetcher) = two_category_site();
        let cache = PageCache::new(&dir, fetcher);
        let parser = BobParser::new().unwrap();
        let crawler = Crawler::new(&cache, &parser);

        crawler.crawl_theme(&theme).unwrap();
        let again = crawler.crawl_theme(&theme).unwrap();

        assert_eq!(again.records.len(), 2);
        assert_eq!(cache.fetcher().calls(), 4);
    }

    #[test]
    fn bad_pages_are_reported_and_skipped() {
        let dir = tmp_dir("failures");
        let good = format!("{BASE}/2017/lord-hobo/");
        let broken = format!("{BASE}/2015/broken-bar/");
        let listing = format!("{BASE}/2017/award/beer-bar/page/2/");

        let category = link_page(&[broken.clone(), listing.clone(), good.clone()]);
        let fetcher = MockFetcher::new()
            .with_page(&good, &business_html(&good, "Lord Hobo", "a, b, c, d"))
            .with_page(&broken, &business_html(&broken, "Broken", "a, b, c, d, e"))
            .with_page(
                &listing,
                &format!(r#"<html><head><link rel="canonical" href="{listing}"></head></html>"#),
            );
        let cache = PageCache::new(&dir, fetcher);
        let parser = BobParser::new().unwrap();

        let report = Crawler::new(&cache, &parser).crawl_category(&category).unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].title, "Lord Hobo");
        assert_eq!(report.skipped_listings, vec![listing]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].reason, ParserError::MetaFieldCount(5));
        assert_eq!(report.failures[0].path, dir.join("business_broken-bar.html"));
    }

    #[test]
    fn fetch_error_aborts_crawl() {
        let dir = tmp_dir("abort");
        let category = link_page(&[format!("{BASE}/2017/missing/")]);
        let cache = PageCache::new(&dir, MockFetcher::new());
        let parser = BobParser::new().unwrap();

        let err = Crawler::new(&cache, &parser).crawl_category(&category).unwrap_err();
        assert!(matches!(err, CrawlError::Scraper(_)));
    }
}
