//! Common types used across the application

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder price text for items where no strategy produced a usable price
pub const PRICE_UNAVAILABLE: &str = "unavailable";

/// Persisted id -> last notified price text
pub type PriceRecords = BTreeMap<String, String>;

/// One product entry scraped from the search results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    /// Raw, locale-formatted price text as shown on the page
    pub price_text: String,
    pub image_url: String,
    pub link: String,
}

impl Listing {
    pub fn has_price(&self) -> bool {
        self.price_text != PRICE_UNAVAILABLE
    }
}

/// Cookie entry as supplied in the credential blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    #[serde(default)]
    pub path: Option<String>,
}

impl SessionCookie {
    pub fn path_or_root(&self) -> &str {
        self.path.as_deref().unwrap_or("/")
    }
}
