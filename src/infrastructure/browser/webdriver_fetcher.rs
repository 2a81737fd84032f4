//! Headless Chrome page rendering over WebDriver

use async_trait::async_trait;
use fantoccini::cookies::Cookie;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{BrowserCfg, TargetCfg};
use crate::shared::errors::FetchError;
use crate::shared::types::SessionCookie;
use crate::shared::utils::generate_id;
use super::{BrowserSession, PageSource};

pub struct WebDriverFetcher {
    browser: BrowserCfg,
    home_url: String,
    target_url: String,
    result_selector: String,
}

impl WebDriverFetcher {
    pub fn new(browser: BrowserCfg, target: &TargetCfg) -> Self {
        Self {
            browser,
            home_url: target.home_url.clone(),
            target_url: target.url.clone(),
            result_selector: target.selectors.result_item.clone(),
        }
    }

    /// Chrome arguments; every session gets a fresh profile directory
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.browser.headless {
            args.push("--headless".to_string());
        }
        args.push("--disable-gpu".to_string());
        args.push("--no-sandbox".to_string());
        args.push(format!(
            "--window-size={},{}",
            self.browser.window_width, self.browser.window_height
        ));
        args.push(format!("--user-data-dir=/tmp/chrome-profile-{}", generate_id()));
        args.push(format!("user-agent={}", self.browser.user_agent));
        args
    }

    fn capabilities(&self) -> Map<String, Value> {
        let mut caps = Map::new();
        caps.insert("browserName".to_string(), json!("chrome"));
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": self.chrome_args() }));
        caps
    }

    async fn connect(&self) -> Result<Client, FetchError> {
        info!("🌐 Connecting to WebDriver at {}", self.browser.webdriver_url);
        ClientBuilder::native()
            .capabilities(self.capabilities())
            .connect(&self.browser.webdriver_url)
            .await
            .map_err(|e| FetchError::SessionStart(e.to_string()))
    }

    /// Rejected cookies are logged and skipped
    async fn inject_cookies(&self, session: &dyn BrowserSession, cookies: &[SessionCookie]) -> usize {
        let mut injected = 0;
        for cookie in cookies {
            match session.add_cookie(cookie).await {
                Ok(()) => injected += 1,
                Err(e) => warn!("⚠️ {}", e),
            }
        }
        injected
    }

    async fn render(&self, session: &dyn BrowserSession, cookies: &[SessionCookie]) -> Result<String, FetchError> {
        session.goto(&self.home_url).await?;
        tokio::time::sleep(Duration::from_millis(self.browser.settle_delay_ms)).await;

        let injected = self.inject_cookies(session, cookies).await;
        debug!("Injected {}/{} cookies", injected, cookies.len());

        session.goto(&self.target_url).await?;
        session
            .wait_for(
                &self.result_selector,
                Duration::from_secs(self.browser.page_load_timeout_secs),
            )
            .await?;
        session.source().await
    }

    /// Render through `session` and close it whatever the outcome
    pub async fn fetch_with(&self, session: &dyn BrowserSession, cookies: &[SessionCookie]) -> Result<String, FetchError> {
        let rendered = self.render(session, cookies).await;

        if let Err(e) = session.close().await {
            warn!("⚠️ Browser session did not close cleanly: {}", e);
        }
        rendered
    }
}

#[async_trait]
impl PageSource for WebDriverFetcher {
    async fn fetch_page(&self, cookies: &[SessionCookie]) -> Result<String, FetchError> {
        let client = self.connect().await?;
        self.fetch_with(&client, cookies).await
    }
}

/// Only an expired wait is a page-load timeout
fn wait_error(error: CmdError, timeout: Duration) -> FetchError {
    match error {
        CmdError::WaitTimeout => FetchError::PageLoadTimeout(timeout.as_secs()),
        other => FetchError::Source(other.to_string()),
    }
}

#[async_trait]
impl BrowserSession for Client {
    async fn goto(&self, url: &str) -> Result<(), FetchError> {
        Client::goto(self, url).await.map_err(|e| FetchError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    async fn add_cookie(&self, cookie: &SessionCookie) -> Result<(), FetchError> {
        let mut c = Cookie::new(cookie.name.clone(), cookie.value.clone());
        c.set_domain(cookie.domain.clone());
        c.set_path(cookie.path_or_root().to_string());

        Client::add_cookie(self, c).await.map_err(|e| FetchError::CookieRejected {
            name: cookie.name.clone(),
            reason: e.to_string(),
        })
    }

    async fn wait_for(&self, css: &str, timeout: Duration) -> Result<(), FetchError> {
        self.wait()
            .at_most(timeout)
            .for_element(Locator::Css(css))
            .await
            .map(|_| ())
            .map_err(|e| wait_error(e, timeout))
    }

    async fn source(&self) -> Result<String, FetchError> {
        Client::source(self).await.map_err(|e| FetchError::Source(e.to_string()))
    }

    async fn close(&self) -> Result<(), FetchError> {
        Client::close(self.clone()).await.map_err(|e| FetchError::Source(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedSession {
        calls: Mutex<Vec<String>>,
        reject_cookie: Option<String>,
        wait_times_out: bool,
    }

    impl ScriptedSession {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BrowserSession for ScriptedSession {
        async fn goto(&self, url: &str) -> Result<(), FetchError> {
            self.record(format!("goto {url}"));
            Ok(())
        }

        async fn add_cookie(&self, cookie: &SessionCookie) -> Result<(), FetchError> {
            if self.reject_cookie.as_deref() == Some(cookie.name.as_str()) {
                return Err(FetchError::CookieRejected {
                    name: cookie.name.clone(),
                    reason: "invalid cookie domain".to_string(),
                });
            }
            self.record(format!("cookie {}", cookie.name));
            Ok(())
        }

        async fn wait_for(&self, css: &str, _timeout: Duration) -> Result<(), FetchError> {
            self.record(format!("wait {css}"));
            if self.wait_times_out {
                return Err(FetchError::PageLoadTimeout(30));
            }
            Ok(())
        }

        async fn source(&self) -> Result<String, FetchError> {
            self.record("source".to_string());
            Ok("<html></html>".to_string())
        }

        async fn close(&self) -> Result<(), FetchError> {
            self.record("close".to_string());
            Ok(())
        }
    }

    fn quick_fetcher() -> WebDriverFetcher {
        let browser = BrowserCfg {
            settle_delay_ms: 0,
            ..BrowserCfg::default()
        };
        WebDriverFetcher::new(browser, &TargetCfg::default())
    }

    fn cookies(names: &[&str]) -> Vec<SessionCookie> {
        names
            .iter()
            .map(|name| SessionCookie {
                name: name.to_string(),
                value: "v".to_string(),
                domain: ".amazon.com.tr".to_string(),
                path: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_rejected_cookie_is_skipped() {
        let session = ScriptedSession {
            reject_cookie: Some("csm-hit".to_string()),
            ..ScriptedSession::default()
        };
        let fetcher = quick_fetcher();
        let jar = cookies(&["session-id", "csm-hit", "ubid-acbtr"]);

        assert_eq!(fetcher.inject_cookies(&session, &jar).await, 2);

        let html = fetcher.fetch_with(&session, &jar).await.unwrap();
        assert_eq!(html, "<html></html>");
        let calls = session.calls();
        assert!(calls.contains(&"cookie ubid-acbtr".to_string()));
        assert!(!calls.contains(&"cookie csm-hit".to_string()));
    }

    #[tokio::test]
    async fn test_render_order() {
        let session = ScriptedSession::default();
        let fetcher = quick_fetcher();
        let target = TargetCfg::default();

        fetcher.fetch_with(&session, &cookies(&["session-id"])).await.unwrap();

        assert_eq!(
            session.calls(),
            vec![
                format!("goto {}", target.home_url),
                "cookie session-id".to_string(),
                format!("goto {}", target.url),
                format!("wait {}", target.selectors.result_item),
                "source".to_string(),
                "close".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_wait_timeout_still_closes_session() {
        let session = ScriptedSession {
            wait_times_out: true,
            ..ScriptedSession::default()
        };

        let err = quick_fetcher().fetch_with(&session, &[]).await.unwrap_err();

        assert!(matches!(err, FetchError::PageLoadTimeout(30)));
        let calls = session.calls();
        assert_eq!(calls.last().map(String::as_str), Some("close"));
        assert!(!calls.contains(&"source".to_string()));
    }

    #[test]
    fn test_only_expired_wait_is_timeout() {
        let timeout = Duration::from_secs(30);
        assert!(matches!(
            wait_error(CmdError::WaitTimeout, timeout),
            FetchError::PageLoadTimeout(30)
        ));
        assert!(matches!(
            wait_error(CmdError::NotJson("connection reset".to_string()), timeout),
            FetchError::Source(_)
        ));
    }

    fn fetcher(headless: bool) -> WebDriverFetcher {
        let browser = BrowserCfg {
            headless,
            ..BrowserCfg::default()
        };
        WebDriverFetcher::new(browser, &TargetCfg::default())
    }

    #[test]
    fn test_chrome_args() {
        let args = fetcher(true).chrome_args();
        assert_eq!(args[0], "--headless");
        assert!(args.contains(&"--window-size=1920,1080".to_string()));
        assert!(args.iter().any(|a| a.starts_with("--user-data-dir=/tmp/chrome-profile-")));
        assert!(args.iter().any(|a| a.starts_with("user-agent=Mozilla/5.0")));
    }

    #[test]
    fn test_headful_has_no_headless_flag() {
        assert!(!fetcher(false).chrome_args().contains(&"--headless".to_string()));
    }

    #[test]
    fn test_profile_dir_is_fresh_per_session() {
        let f = fetcher(true);
        let profile = |args: Vec<String>| args.into_iter().find(|a| a.starts_with("--user-data-dir")).unwrap();
        assert_ne!(profile(f.chrome_args()), profile(f.chrome_args()));
    }

    #[test]
    fn test_capabilities_target_chrome() {
        let caps = fetcher(true).capabilities();
        assert_eq!(caps["browserName"], "chrome");
        assert!(caps["goog:chromeOptions"]["args"].is_array());
    }
}
