//! Extraction domain - listings from search results markup

mod rules;
mod listing_extractor;

pub use rules::ExtractionRules;
pub use listing_extractor::{ListingExtractor, PageExtraction};
