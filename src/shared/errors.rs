//! Error handling for the application

use thiserror::Error;

/// Session provisioning errors (credential blob and cookie file)
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Credential variable {0} is not set")]
    MissingCredential(String),

    #[error("Credential blob is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("Cookie file not found: {0}")]
    CookieFileMissing(String),

    #[error("Cookie file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cookie material is not a JSON cookie list: {0}")]
    InvalidCookies(#[from] serde_json::Error),
}

/// Page fetch and render errors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("WebDriver session could not be started: {0}")]
    SessionStart(String),

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Result list did not appear within {0}s")]
    PageLoadTimeout(u64),

    #[error("Cookie {name} rejected: {reason}")]
    CookieRejected { name: String, reason: String },

    #[error("Page source unavailable: {0}")]
    Source(String),
}

/// Per-item extraction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Result item has no identifier")]
    MissingId,

    #[error("Item {id}: missing {field}")]
    MissingField { id: String, field: &'static str },
}

/// Price store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store {path} could not be read: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Store {path} could not be written: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Notification delivery errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notifier is not configured: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Channel rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Session setup failed: {0}")]
    Session(#[from] SessionError),

    #[error("Page fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
