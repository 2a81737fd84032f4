//! Listing extraction from rendered search results HTML

use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use crate::domain::price::PriceParser;
use crate::shared::errors::ExtractionError;
use crate::shared::types::{Listing, PRICE_UNAVAILABLE};
use crate::shared::utils::clean_text;
use super::ExtractionRules;

/// Result of extracting every result item on one page
#[derive(Debug, Default)]
pub struct PageExtraction {
    pub items_found: usize,
    pub listings: Vec<Listing>,
    pub failures: Vec<ExtractionError>,
}

pub struct ListingExtractor {
    rules: ExtractionRules,
    parser: PriceParser,
}

impl ListingExtractor {
    pub fn new(rules: ExtractionRules, parser: PriceParser) -> Self {
        Self { rules, parser }
    }

    pub fn extract_page(&self, html: &str) -> PageExtraction {
        let document = Html::parse_document(html);
        let mut page = PageExtraction::default();

        for item in document.select(&self.rules.result_item) {
            page.items_found += 1;
            match self.extract_item(item) {
                Ok(listing) => {
                    debug!("Parsed {} - {} ({})", listing.id, listing.title, listing.price_text);
                    page.listings.push(listing);
                }
                Err(e) => {
                    warn!("⚠️ Item parse error: {}", e);
                    page.failures.push(e);
                }
            }
        }

        page
    }

    pub fn extract_item(&self, item: ElementRef<'_>) -> Result<Listing, ExtractionError> {
        let id = item
            .value()
            .attr(&self.rules.id_attribute)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ExtractionError::MissingId)?
            .to_string();

        let missing = |field: &'static str| ExtractionError::MissingField {
            id: id.clone(),
            field,
        };

        let image = item.select(&self.rules.image).next().ok_or_else(|| missing("image"))?;
        let title = image
            .value()
            .attr("alt")
            .map(|alt| alt.trim().to_string())
            .ok_or_else(|| missing("title"))?;
        let image_url = image
            .value()
            .attr("src")
            .map(str::to_string)
            .ok_or_else(|| missing("image source"))?;
        let link = item
            .select(&self.rules.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| self.rules.base_url.join(href.trim()).ok())
            .map(String::from)
            .ok_or_else(|| missing("link"))?;

        let price_text = self
            .extract_price(item)
            .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string());

        Ok(Listing {
            id,
            title,
            price_text,
            image_url,
            link,
        })
    }

    /// First element text, across strategies in order, that looks like a price
    pub fn extract_price(&self, item: ElementRef<'_>) -> Option<String> {
        self.rules.price.iter().find_map(|selector| {
            item.select(selector)
                .map(|el| clean_text(&el.text().collect::<String>()))
                .find(|text| self.parser.looks_like_price(text))
        })
    }
}
