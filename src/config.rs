use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

pub const DEFAULT_TARGET_URL: &str = "https://www.amazon.com.tr/s?i=fashion&rh=n%3A12466553031%2Cp_36%3A-140000%2Cp_6%3AA1IREBQAVXLMLM%257CA1UNQM1SR2CHM%257CA1WXSNTVWP8CEC%2Cp_n_g-1004158520091%3A13681797031%257C13681798031%2Cp_123%3A256097&s=price-asc-rank&dc&fs=true&_encoding=UTF8";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetCfg {
    pub url: String,
    /// Visited first so the session cookies can be attached to the right domain
    pub home_url: String,
    pub selectors: SelectorsCfg,
}

impl Default for TargetCfg {
    fn default() -> Self {
        Self {
            url: DEFAULT_TARGET_URL.to_string(),
            home_url: "https://www.amazon.com.tr".to_string(),
            selectors: SelectorsCfg::default(),
        }
    }
}

/// CSS selectors for the search results markup.
/// `price` is tried in order; later entries are narrower fallbacks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorsCfg {
    pub result_item: String,
    pub id_attribute: String,
    pub image: String,
    pub link: String,
    pub price: Vec<String>,
}

impl Default for SelectorsCfg {
    fn default() -> Self {
        Self {
            result_item: "div[data-component-type='s-search-result']".to_string(),
            id_attribute: "data-asin".to_string(),
            image: "img.s-image".to_string(),
            link: "a.a-link-normal".to_string(),
            price: vec![
                ".a-price .a-offscreen".to_string(),
                ".a-price-whole".to_string(),
                "span.a-color-base".to_string(),
                "div.a-section.a-spacing-small.puis-padding-left-small.puis-padding-right-small span.a-color-base".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterCfg {
    pub price_ceiling: f64,
    pub currency_marker: String,
}

impl Default for FilterCfg {
    fn default() -> Self {
        Self {
            price_ceiling: 1350.0,
            currency_marker: "TL".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreCfg {
    pub path: String,
}

impl Default for StoreCfg {
    fn default() -> Self {
        Self { path: "send_products.txt".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionCfg {
    /// Environment variable holding the base64 cookie blob
    pub cookie_env: String,
    pub cookie_file: String,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            cookie_env: "COOKIE_B64".to_string(),
            cookie_file: "cookie_cep.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserCfg {
    pub webdriver_url: String,
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub user_agent: String,
    pub page_load_timeout_secs: u64,
    pub settle_delay_ms: u64,
}

impl Default for BrowserCfg {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            window_width: 1920,
            window_height: 1080,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/115 Safari/537.36".to_string(),
            page_load_timeout_secs: 30,
            settle_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramCfg {
    pub api_base: String,
    pub bot_token_env: String,
    pub chat_id_env: String,
}

impl Default for TelegramCfg {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            bot_token_env: "TELEGRAM_BOT_TOKEN".to_string(),
            chat_id_env: "TELEGRAM_CHAT_ID".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target: TargetCfg,
    pub filter: FilterCfg,
    pub store: StoreCfg,
    pub session: SessionCfg,
    pub browser: BrowserCfg,
    pub telegram: TelegramCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let cfg: Self = toml::from_str(&s).context("parse config TOML")?;
        Ok(cfg)
    }

    /// Load from `path` when given, otherwise fall back to built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}
