// src/application/report.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub items_found: usize,
    pub extraction_failures: usize,
    pub unpriced: usize,
    pub over_ceiling: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStats {
    pub new: usize,
    pub changed: usize,
    pub unchanged: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryStats {
    pub delivered: usize,
    pub failed: usize,
    /// Ids whose delivery failed; kept out of the store so they are retried
    pub failed_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub target_url: String,
    pub price_ceiling: f64,
    pub extraction: ExtractionStats,
    pub changes: ChangeStats,
    pub delivery: DeliveryStats,
    pub store_updated: bool,
    pub dry_run: bool,
    pub timestamp: DateTime<Utc>,
}

impl RunReport {
    pub fn new(target_url: impl Into<String>, price_ceiling: f64, dry_run: bool) -> Self {
        Self {
            target_url: target_url.into(),
            price_ceiling,
            extraction: ExtractionStats::default(),
            changes: ChangeStats::default(),
            delivery: DeliveryStats::default(),
            store_updated: false,
            dry_run,
            timestamp: Utc::now(),
        }
    }

    pub fn to_send(&self) -> usize {
        self.changes.new + self.changes.changed
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
