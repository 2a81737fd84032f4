//! Utility functions and helpers

/// Strip the no-break spaces the storefront uses inside prices, then trim
pub fn clean_text(raw: &str) -> String {
    raw.replace(['\u{a0}', '\u{202f}'], "").trim().to_string()
}

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
