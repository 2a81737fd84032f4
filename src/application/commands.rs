//! CLI commands and handlers
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::application::orchestrator::{ListingPipeline, PriceWatcher, WatchConfig};
use crate::config::Config;
use crate::domain::extraction::ExtractionRules;
use crate::infrastructure::{
    DryRunNotifier, Notifier, PriceStore, SessionProvisioner, TelegramNotifier, WebDriverFetcher,
};
use crate::shared::errors::AppError;

#[derive(Parser)]
#[command(name = "pricewatch")]
#[command(version, about = "Watch a search results page and report new or repriced products")]
pub struct Cli {
    /// Path to config file (optional)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the page once, notify new/changed products and update the store
    Run(RunArgs),

    /// Extract and filter listings from a saved HTML page without a browser
    Parse {
        /// Saved search results page
        html: PathBuf,

        /// Maximum accepted price (overrides config)
        #[arg(long)]
        max_price: Option<f64>,
    },

    /// Print the tracked id/price records
    Store {
        /// Store file (overrides config)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Search results URL (overrides config)
    #[arg(long)]
    pub url: Option<String>,

    /// Price store file (overrides config)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Maximum accepted price (overrides config)
    #[arg(long)]
    pub max_price: Option<f64>,

    /// WebDriver endpoint (overrides config)
    #[arg(long)]
    pub webdriver: Option<String>,

    /// Log messages instead of sending them and leave the store untouched
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl RunArgs {
    /// CLI flags take priority over the config file
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(url) = &self.url {
            cfg.target.url = url.clone();
        }
        if let Some(store) = &self.store {
            cfg.store.path = store.display().to_string();
        }
        if let Some(max_price) = self.max_price {
            cfg.filter.price_ceiling = max_price;
        }
        if let Some(webdriver) = &self.webdriver {
            cfg.browser.webdriver_url = webdriver.clone();
        }
    }
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(command: Commands, config: Config) -> Result<(), AppError> {
        match command {
            Commands::Run(args) => Self::execute_run_command(args, config).await,
            Commands::Parse { html, max_price } => Self::execute_parse_command(html, max_price, config),
            Commands::Store { path } => Self::execute_store_command(path, config),
        }
    }

    /// Execute run command. Run-level failures are logged, not returned.
    async fn execute_run_command(args: RunArgs, mut config: Config) -> Result<(), AppError> {
        args.apply(&mut config);
        if !config.filter.price_ceiling.is_finite() {
            return Err(AppError::ConfigError("price ceiling must be a finite number".to_string()));
        }
        let rules = ExtractionRules::from_config(&config.target.selectors, &config.target.url)?;

        let notifier: Box<dyn Notifier> = if args.dry_run {
            Box::new(DryRunNotifier)
        } else {
            match TelegramNotifier::from_env(&config.telegram) {
                Ok(n) => Box::new(n),
                Err(e) => {
                    error!("❌ {}", e);
                    return Ok(());
                }
            }
        };

        let watch = WatchConfig::from_config(&config, args.dry_run);
        info!("🚀 Watching {} (ceiling {} {})", watch.target_url, watch.price_ceiling, watch.currency_marker);

        let fetcher = WebDriverFetcher::new(config.browser.clone(), &config.target);
        let watcher = PriceWatcher::new(watch, rules, Box::new(fetcher), notifier);
        let provisioner = SessionProvisioner::new(&config.session);

        match watcher.execute(&provisioner).await {
            Ok(report) => {
                info!(
                    "✅ Run finished: {} found, {} new, {} changed, {} delivered, {} failed",
                    report.extraction.items_found,
                    report.changes.new,
                    report.changes.changed,
                    report.delivery.delivered,
                    report.delivery.failed,
                );
                if let Some(path) = &args.report {
                    match report.to_json() {
                        Ok(json) => {
                            if let Err(e) = fs::write(path, json) {
                                warn!("⚠️ Could not write report {}: {}", path.display(), e);
                            }
                        }
                        Err(e) => warn!("⚠️ Could not serialize report: {}", e),
                    }
                }
            }
            Err(e) => error!("❌ {}", e),
        }

        Ok(())
    }

    /// Execute parse command
    fn execute_parse_command(html: PathBuf, max_price: Option<f64>, config: Config) -> Result<(), AppError> {
        let rules = ExtractionRules::from_config(&config.target.selectors, &config.target.url)?;
        let ceiling = max_price.unwrap_or(config.filter.price_ceiling);
        let pipeline = ListingPipeline::new(rules, &config.filter.currency_marker, ceiling);

        let content = fs::read_to_string(&html)
            .map_err(|e| AppError::ConfigError(format!("cannot read {}: {}", html.display(), e)))?;
        let (page, filtered) = pipeline.process(&content);

        info!(
            "🔍 {} items, {} failed extraction, {} unpriced, {} above {}",
            page.items_found,
            page.failures.len(),
            filtered.unpriced,
            filtered.over_ceiling,
            ceiling,
        );
        for listing in &filtered.kept {
            println!("{} | {} | {} | {}", listing.id, listing.price_text, listing.title, listing.link);
        }
        Ok(())
    }

    /// Execute store command
    fn execute_store_command(path: Option<PathBuf>, config: Config) -> Result<(), AppError> {
        let path = path.unwrap_or_else(|| PathBuf::from(&config.store.path));
        let store = PriceStore::new(path);
        let records = store.load()?;

        info!("📁 {} tracked products in {}", records.len(), store.path().display());
        for (id, price) in &records {
            println!("{} | {}", id, price);
        }
        Ok(())
    }
}
