//! Batch run: fetch, extract, filter, classify, notify, persist

use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::change::{ChangeDetector, ChangeKind};
use crate::domain::extraction::{ExtractionRules, ListingExtractor, PageExtraction};
use crate::domain::price::{FilterOutcome, PriceFilter, PriceParser};
use crate::infrastructure::{Notifier, PageSource, PriceStore, SessionProvisioner};
use crate::shared::errors::AppError;
use crate::shared::types::{Listing, SessionCookie};
use super::report::RunReport;

/// Settings the pipeline needs for one run
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub target_url: String,
    pub store_path: PathBuf,
    pub price_ceiling: f64,
    pub currency_marker: String,
    /// Notify through the dry-run channel and never write the store
    pub dry_run: bool,
}

impl WatchConfig {
    pub fn from_config(cfg: &Config, dry_run: bool) -> Self {
        Self {
            target_url: cfg.target.url.clone(),
            store_path: PathBuf::from(&cfg.store.path),
            price_ceiling: cfg.filter.price_ceiling,
            currency_marker: cfg.filter.currency_marker.clone(),
            dry_run,
        }
    }
}

/// Parse a rendered page and apply the ceiling filter
pub struct ListingPipeline {
    extractor: ListingExtractor,
    filter: PriceFilter,
}

impl ListingPipeline {
    pub fn new(rules: ExtractionRules, currency_marker: &str, price_ceiling: f64) -> Self {
        let parser = PriceParser::new(currency_marker);
        Self {
            extractor: ListingExtractor::new(rules, parser.clone()),
            filter: PriceFilter::new(parser, price_ceiling),
        }
    }

    pub fn process(&self, html: &str) -> (PageExtraction, FilterOutcome) {
        let mut page = self.extractor.extract_page(html);
        let listings = std::mem::take(&mut page.listings);
        let filtered = self.filter.apply(listings);
        (page, filtered)
    }
}

pub struct PriceWatcher {
    config: WatchConfig,
    pipeline: ListingPipeline,
    source: Box<dyn PageSource>,
    notifier: Box<dyn Notifier>,
    store: PriceStore,
}

impl PriceWatcher {
    pub fn new(
        config: WatchConfig,
        rules: ExtractionRules,
        source: Box<dyn PageSource>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let pipeline = ListingPipeline::new(rules, &config.currency_marker, config.price_ceiling);
        let store = PriceStore::new(config.store_path.clone());
        Self {
            config,
            pipeline,
            source,
            notifier,
            store,
        }
    }

    /// Provision the session, then run the pipeline with its cookies
    pub async fn execute(&self, provisioner: &SessionProvisioner) -> Result<RunReport, AppError> {
        let cookies = provisioner.provision()?;
        info!("🍪 Loaded {} session cookies", cookies.len());
        self.run(&cookies).await
    }

    pub async fn run(&self, cookies: &[SessionCookie]) -> Result<RunReport, AppError> {
        let mut report = RunReport::new(&self.config.target_url, self.config.price_ceiling, self.config.dry_run);

        let html = self.source.fetch_page(cookies).await?;
        let (page, filtered) = self.pipeline.process(&html);
        info!("🔍 {} products found", page.items_found);

        report.extraction.items_found = page.items_found;
        report.extraction.extraction_failures = page.failures.len();
        report.extraction.unpriced = filtered.unpriced;
        report.extraction.over_ceiling = filtered.over_ceiling;

        let records = self.store.load()?;
        let changes = ChangeDetector::new(&records).partition(filtered.kept);

        report.changes.unchanged = changes.unchanged.len();
        for item in &changes.to_send {
            match &item.kind {
                ChangeKind::New => {
                    report.changes.new += 1;
                    info!("🆕 New product: {}", item.listing.title);
                }
                ChangeKind::Changed { previous } => {
                    report.changes.changed += 1;
                    info!("📉 Price changed: {} → {} → {}", item.listing.title, previous, item.listing.price_text);
                }
                ChangeKind::Unchanged => {}
            }
        }

        if changes.to_send.is_empty() {
            info!("⚠️ No new or repriced products found");
            return Ok(report);
        }

        let mut delivered: Vec<Listing> = Vec::with_capacity(changes.to_send.len());
        for item in &changes.to_send {
            match self.notifier.notify(item).await {
                Ok(()) => delivered.push(item.listing.clone()),
                Err(e) => {
                    warn!("⚠️ {} delivery failed for {}: {}", self.notifier.name(), item.listing.id, e);
                    report.delivery.failed_ids.push(item.listing.id.clone());
                }
            }
        }
        report.delivery.delivered = delivered.len();
        report.delivery.failed = report.delivery.failed_ids.len();

        if self.config.dry_run {
            info!("📝 Dry run: store left untouched");
        } else if !delivered.is_empty() {
            self.store.save(&delivered)?;
            report.store_updated = true;
            info!("📁 Store updated: {} products added/updated", delivered.len());
        }

        Ok(report)
    }
}
