//! Price domain - normalization and ceiling filtering

mod price_parser;
mod price_filter;

pub use price_parser::PriceParser;
pub use price_filter::{FilterDecision, FilterOutcome, PriceFilter};
