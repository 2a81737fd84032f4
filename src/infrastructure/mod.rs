//! Infrastructure layer - browser, notification channel and price store

pub mod browser;
pub mod notify;
pub mod store;

pub use browser::{PageSource, SessionProvisioner, WebDriverFetcher};
pub use notify::{DryRunNotifier, Notifier, TelegramNotifier};
pub use store::PriceStore;
