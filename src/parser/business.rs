// Best of Boston business page parsing
use crate::model::{BusinessPage, BusinessRecord, ParserError};
use crate::utils::{clean_spaces, strip_label};

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

pub trait Parser {
    fn parse(&self, html: &str) -> Result<BusinessPage, ParserError>;
}

pub struct BobParser {
    canonical: Selector,
    category: Selector,
    title: Selector,
    content: Selector,
    paragraph: Selector,
    meta: Selector,
    next_page: Regex,
    year: Regex,
}

fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::HtmlParseError(e.to_string()))
}

fn regex(src: &str) -> Result<Regex, ParserError> {
    Regex::new(src).map_err(|e| ParserError::HtmlParseError(e.to_string()))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

impl BobParser {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            canonical: selector(r#"link[rel="canonical"]"#)?,
            category: selector("h2.thin-line")?,
            title: selector("h3.post-title")?,
            content: selector("div.bob-content")?,
            paragraph: selector("p")?,
            meta: selector("div.bm-bob-meta")?,
            next_page: regex(r"/page/[0-9]+")?,
            year: regex(r"/best-of-boston/([0-9]{4})/[^/]+/?$")?,
        })
    }

    /// Year segment of a business URL, `.../best-of-boston/<year>/<slug>/`.
    pub fn year_from_url(&self, url: &str) -> Result<String, ParserError> {
        self.year
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ParserError::UrlShape(url.to_string()))
    }

    fn first<'a>(
        &self,
        scope: &'a Html,
        sel: &Selector,
        field: &'static str,
    ) -> Result<ElementRef<'a>, ParserError> {
        scope.select(sel).next().ok_or(ParserError::MissingField(field))
    }
}

/// Splits the meta block into address, neighborhood, phone and website. Any
/// other number of comma-separated parts is rejected.
pub fn split_meta(meta: &str) -> Result<[String; 4], ParserError> {
    let parts: Vec<&str> = meta.split(',').collect();
    match parts.as_slice() {
        [address, neighborhood, phone, website] => Ok([
            address.trim().to_string(),
            neighborhood.trim().to_string(),
            phone.trim().to_string(),
            website.trim().to_string(),
        ]),
        _ => Err(ParserError::MetaFieldCount(parts.len())),
    }
}

impl Parser for BobParser {
    fn parse(&self, html: &str) -> Result<BusinessPage, ParserError> {
        let document = Html::parse_document(html);

        let url = self
            .first(&document, &self.canonical, "canonical link")?
            .value()
            .attr("href")
            .ok_or(ParserError::MissingField("canonical href"))?
            .to_string();

        // e.g. /best-of-boston/2017/award/new-restaurant/page/2/
        if self.next_page.is_match(&url) {
            return Ok(BusinessPage::Listing(url));
        }

        let heading = clean_spaces(&text_of(self.first(&document, &self.category, "category")?));
        let category = strip_label(heading.trim());

        let year = self.year_from_url(&url)?;

        let title = text_of(self.first(&document, &self.title, "title")?).trim().to_string();

        let content = self.first(&document, &self.content, "content")?;
        let description = content
            .select(&self.paragraph)
            .next()
            .map(text_of)
            .map(|t| clean_spaces(&t).trim().to_string())
            .ok_or(ParserError::MissingField("description"))?;

        let meta = clean_spaces(&text_of(self.first(&document, &self.meta, "meta")?));
        let [address, neighborhood, phone, website] = split_meta(&meta)?;

        Ok(BusinessPage::Record(BusinessRecord {
            url,
            year,
            title,
            description,
            address,
            neighborhood,
            phone,
            website,
            category,
        }))
    }
}
