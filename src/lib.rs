//! Pricewatch - search results price watcher
//! Built with Domain-Driven Design principles

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use application::{PriceWatcher, RunReport, WatchConfig};
pub use domain::change::ChangeDetector;
pub use domain::extraction::ListingExtractor;
pub use domain::price::{PriceFilter, PriceParser};
pub use infrastructure::PriceStore;
