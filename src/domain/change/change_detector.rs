//! Classifies listings against the persisted price records

use crate::shared::types::{Listing, PriceRecords};
use super::{ChangeKind, ChangeSet, ClassifiedListing};

/// Read-only view over the price records loaded at run start.
///
/// Comparison is on the raw price text, not the parsed value: any textual
/// drift such as spacing or currency symbol counts as a change.
pub struct ChangeDetector<'a> {
    records: &'a PriceRecords,
}

impl<'a> ChangeDetector<'a> {
    pub fn new(records: &'a PriceRecords) -> Self {
        Self { records }
    }

    pub fn classify(&self, listing: &Listing) -> ChangeKind {
        let current = listing.price_text.trim();
        match self.records.get(listing.id.trim()) {
            None => ChangeKind::New,
            Some(previous) if previous == current => ChangeKind::Unchanged,
            Some(previous) => ChangeKind::Changed {
                previous: previous.clone(),
            },
        }
    }

    /// Split listings into the to-send set and the unchanged remainder,
    /// keeping page order within each.
    pub fn partition(&self, listings: Vec<Listing>) -> ChangeSet {
        let mut set = ChangeSet::default();
        for listing in listings {
            let kind = self.classify(&listing);
            if kind.should_notify() {
                set.to_send.push(ClassifiedListing { listing, kind });
            } else {
                set.unchanged.push(listing);
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, price: &str) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("Item {}", id),
            price_text: price.to_string(),
            image_url: String::new(),
            link: String::new(),
        }
    }

    fn records(pairs: &[(&str, &str)]) -> PriceRecords {
        pairs
            .iter()
            .map(|(id, price)| (id.to_string(), price.to_string()))
            .collect()
    }

    #[test]
    fn test_unknown_id_is_new() {
        let store = records(&[("B0OTHER", "500 TL")]);
        let detector = ChangeDetector::new(&store);
        assert_eq!(detector.classify(&listing("B0NEW", "999 TL")), ChangeKind::New);
    }

    #[test]
    fn test_same_text_is_unchanged() {
        let store = records(&[("B01", "1.234,56 TL")]);
        let detector = ChangeDetector::new(&store);
        assert_eq!(detector.classify(&listing("B01", "1.234,56 TL")), ChangeKind::Unchanged);
    }

    #[test]
    fn test_different_text_is_changed() {
        let store = records(&[("B01", "1.299,00 TL")]);
        let detector = ChangeDetector::new(&store);
        assert_eq!(
            detector.classify(&listing("B01", "1.199,00 TL")),
            ChangeKind::Changed {
                previous: "1.299,00 TL".to_string()
            }
        );
    }

    #[test]
    fn test_equal_value_with_different_text_is_changed() {
        let store = records(&[("B01", "999 TL")]);
        let detector = ChangeDetector::new(&store);
        assert!(matches!(
            detector.classify(&listing("B01", "999,00 TL")),
            ChangeKind::Changed { .. }
        ));
    }

    #[test]
    fn test_partition_keeps_page_order() {
        let store = records(&[("B", "200 TL"), ("C", "300 TL")]);
        let detector = ChangeDetector::new(&store);
        let set = detector.partition(vec![
            listing("A", "100 TL"),
            listing("B", "200 TL"),
            listing("C", "250 TL"),
        ]);

        let sent: Vec<&str> = set.to_send.iter().map(|c| c.listing.id.as_str()).collect();
        assert_eq!(sent, vec!["A", "C"]);
        assert_eq!(set.unchanged.len(), 1);
        assert_eq!(set.count(|k| matches!(k, ChangeKind::New)), 1);
        assert_eq!(set.count(|k| matches!(k, ChangeKind::Changed { .. })), 1);
    }
}
