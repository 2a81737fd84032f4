//! Locale-formatted price text to numeric value

/// Parses prices written with `.` thousands separators, `,` decimals and a
/// currency suffix, e.g. `1.234,56 TL`.
#[derive(Debug, Clone)]
pub struct PriceParser {
    currency_marker: String,
}

impl PriceParser {
    pub fn new(currency_marker: impl Into<String>) -> Self {
        Self {
            currency_marker: currency_marker.into(),
        }
    }

    /// True when `text` carries the currency marker and at least one digit
    pub fn looks_like_price(&self, text: &str) -> bool {
        text.contains(self.currency_marker.as_str()) && text.chars().any(|c| c.is_ascii_digit())
    }

    /// Returns `None` for anything that is not a plain decimal after cleanup
    pub fn parse(&self, price_text: &str) -> Option<f64> {
        let stripped = if self.currency_marker.is_empty() {
            price_text.to_string()
        } else {
            price_text.replace(self.currency_marker.as_str(), "")
        };
        let cleaned = stripped.replace('.', "").replace(',', ".");
        let cleaned = cleaned.trim();

        let has_digit = cleaned.chars().any(|c| c.is_ascii_digit());
        let plain = cleaned.chars().all(|c| c.is_ascii_digit() || c == '.');
        if !has_digit || !plain {
            return None;
        }

        cleaned.parse::<f64>().ok()
    }
}
