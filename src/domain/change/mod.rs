//! Change domain - NEW / CHANGED / UNCHANGED classification

mod change_detector;

pub use change_detector::ChangeDetector;

use crate::shared::types::Listing;
use serde::Serialize;

/// Classification of a listing against its stored price
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ChangeKind {
    New,
    Changed { previous: String },
    Unchanged,
}

impl ChangeKind {
    pub fn should_notify(&self) -> bool {
        !matches!(self, ChangeKind::Unchanged)
    }
}

/// A listing paired with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedListing {
    pub listing: Listing,
    pub kind: ChangeKind,
}

#[derive(Debug, Default)]
pub struct ChangeSet {
    pub to_send: Vec<ClassifiedListing>,
    pub unchanged: Vec<Listing>,
}

impl ChangeSet {
    pub fn count(&self, pred: impl Fn(&ChangeKind) -> bool) -> usize {
        self.to_send.iter().filter(|c| pred(&c.kind)).count()
    }
}
