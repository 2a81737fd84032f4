//! Compiled selectors for the search results markup

use crate::config::SelectorsCfg;
use crate::shared::errors::AppError;
use reqwest::Url;
use scraper::Selector;

fn compile(css: &str) -> Result<Selector, AppError> {
    Selector::parse(css).map_err(|e| AppError::ConfigError(format!("invalid selector {css:?}: {e}")))
}

/// Selector set used by the listing extractor.
///
/// `price` holds the price strategies in priority order. Relative links
/// resolve against `base_url`, the page the HTML was rendered from.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    pub base_url: Url,
    pub result_item: Selector,
    pub id_attribute: String,
    pub image: Selector,
    pub link: Selector,
    pub price: Vec<Selector>,
}

impl ExtractionRules {
    pub fn from_config(cfg: &SelectorsCfg, base_url: &str) -> Result<Self, AppError> {
        if cfg.price.is_empty() {
            return Err(AppError::ConfigError("at least one price selector is required".to_string()));
        }
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::ConfigError(format!("invalid target url {base_url:?}: {e}")))?;

        Ok(Self {
            base_url,
            result_item: compile(&cfg.result_item)?,
            id_attribute: cfg.id_attribute.clone(),
            image: compile(&cfg.image)?,
            link: compile(&cfg.link)?,
            price: cfg
                .price
                .iter()
                .map(|css| compile(css))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.amazon.com.tr/s?k=kazak";

    #[test]
    fn test_default_rules_compile() {
        let rules = ExtractionRules::from_config(&SelectorsCfg::default(), BASE).unwrap();
        assert_eq!(rules.price.len(), 4);
        assert_eq!(rules.id_attribute, "data-asin");
        assert_eq!(rules.base_url.host_str(), Some("www.amazon.com.tr"));
    }

    #[test]
    fn test_relative_target_url_rejected() {
        assert!(matches!(
            ExtractionRules::from_config(&SelectorsCfg::default(), "/s?k=kazak"),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_bad_selector_is_config_error() {
        let cfg = SelectorsCfg {
            link: "a[".to_string(),
            ..SelectorsCfg::default()
        };
        assert!(matches!(
            ExtractionRules::from_config(&cfg, BASE),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_empty_price_strategies_rejected() {
        let cfg = SelectorsCfg {
            price: Vec::new(),
            ..SelectorsCfg::default()
        };
        assert!(ExtractionRules::from_config(&cfg, BASE).is_err());
    }
}
