use crate::model::ParserError;

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Which `href`s to keep when collecting links from a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPattern {
    /// Any best-of-boston year page, e.g. `/best-of-boston/2017/some-bar/`.
    YearPage,
    /// Award category pages, e.g. `/best-of-boston/2017/award/beer-bar/`.
    Award,
}

impl LinkPattern {
    fn regex(self) -> Result<Regex, ParserError> {
        let src = match self {
            LinkPattern::YearPage => r"/best-of-boston/[0-9]+/",
            LinkPattern::Award => r"/best-of-boston/[0-9]+/award/",
        };
        Regex::new(src).map_err(|e| ParserError::HtmlParseError(e.to_string()))
    }
}

/// Collects the `href` of every anchor matching `pattern`, dropping exact
/// duplicates. Order follows first appearance in the document. Hrefs are not
/// normalized, so `/a/` and `https://host/a/` are distinct.
pub fn extract_links(html: &str, pattern: LinkPattern) -> Result<Vec<String>, ParserError> {
    let document = Html::parse_document(html);
    let anchor = Selector::parse("a[href]").map_err(|e| ParserError::HtmlParseError(e.to_string()))?;
    let re = pattern.regex()?;

    let mut seen = HashSet::new();
    let urls = document
        .select(&anchor)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| re.is_match(href))
        .filter(|href| seen.insert(href.to_string()))
        .map(str::to_string)
        .collect();

    Ok(urls)
}
