//! Ceiling filter over extracted listings

use crate::shared::types::Listing;
use super::PriceParser;
use tracing::debug;

/// Outcome of checking one listing against the ceiling
#[derive(Debug, Clone, PartialEq)]
pub enum FilterDecision {
    Keep(f64),
    Unpriced,
    OverCeiling(f64),
}

/// Listings that survived the filter plus drop counts
#[derive(Debug, Default)]
pub struct FilterOutcome {
    pub kept: Vec<Listing>,
    pub unpriced: usize,
    pub over_ceiling: usize,
}

#[derive(Debug, Clone)]
pub struct PriceFilter {
    parser: PriceParser,
    ceiling: f64,
}

impl PriceFilter {
    pub fn new(parser: PriceParser, ceiling: f64) -> Self {
        Self { parser, ceiling }
    }

    pub fn evaluate(&self, listing: &Listing) -> FilterDecision {
        if !listing.has_price() {
            return FilterDecision::Unpriced;
        }
        match self.parser.parse(&listing.price_text) {
            None => FilterDecision::Unpriced,
            Some(value) if value > self.ceiling => FilterDecision::OverCeiling(value),
            Some(value) => FilterDecision::Keep(value),
        }
    }

    pub fn apply(&self, listings: Vec<Listing>) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();
        for listing in listings {
            match self.evaluate(&listing) {
                FilterDecision::Keep(_) => outcome.kept.push(listing),
                FilterDecision::Unpriced => {
                    debug!("Dropping {}: price {:?} not usable", listing.id, listing.price_text);
                    outcome.unpriced += 1;
                }
                FilterDecision::OverCeiling(value) => {
                    debug!("Dropping {}: {} above ceiling {}", listing.id, value, self.ceiling);
                    outcome.over_ceiling += 1;
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::PRICE_UNAVAILABLE;

    fn listing(id: &str, price: &str) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("Phone {}", id),
            price_text: price.to_string(),
            image_url: format!("https://img.example/{}.jpg", id),
            link: format!("https://shop.example/dp/{}", id),
        }
    }

    fn filter() -> PriceFilter {
        PriceFilter::new(PriceParser::new("TL"), 1350.0)
    }

    #[test]
    fn test_ceiling_is_inclusive() {
        assert_eq!(filter().evaluate(&listing("A", "1.350,00 TL")), FilterDecision::Keep(1350.0));
        assert_eq!(
            filter().evaluate(&listing("B", "1.351,00 TL")),
            FilterDecision::OverCeiling(1351.0)
        );
    }

    #[test]
    fn test_unavailable_price_is_dropped() {
        assert_eq!(filter().evaluate(&listing("A", PRICE_UNAVAILABLE)), FilterDecision::Unpriced);
        assert_eq!(filter().evaluate(&listing("B", "Out of stock TL")), FilterDecision::Unpriced);
    }

    #[test]
    fn test_apply_counts_drops() {
        let outcome = filter().apply(vec![
            listing("A", "999 TL"),
            listing("B", "2.499,90 TL"),
            listing("C", PRICE_UNAVAILABLE),
            listing("D", "1.234,56 TL"),
        ]);

        let kept: Vec<&str> = outcome.kept.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(kept, vec!["A", "D"]);
        assert_eq!(outcome.over_ceiling, 1);
        assert_eq!(outcome.unpriced, 1);
    }
}
