use async_trait::async_trait;
use std::time::Duration;
use crate::shared::errors::FetchError;
use crate::shared::types::SessionCookie;

/// Source of the rendered search results HTML
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Render the target page with `cookies` attached and return its HTML.
    /// Any browser resource must be released before this returns, on
    /// success and on failure alike.
    async fn fetch_page(&self, cookies: &[SessionCookie]) -> Result<String, FetchError>;
}

/// The browser commands a render needs. `close` ends the session.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    async fn goto(&self, url: &str) -> Result<(), FetchError>;

    async fn add_cookie(&self, cookie: &SessionCookie) -> Result<(), FetchError>;

    /// Block until `css` matches or `timeout` passes
    async fn wait_for(&self, css: &str, timeout: Duration) -> Result<(), FetchError>;

    async fn source(&self) -> Result<String, FetchError>;

    async fn close(&self) -> Result<(), FetchError>;
}
