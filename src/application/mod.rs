//! Application layer - use cases and services

pub mod commands;
pub mod orchestrator;
pub mod report;

pub use commands::{Cli, Commands, CommandExecutor};
pub use orchestrator::{ListingPipeline, PriceWatcher, WatchConfig};
pub use report::RunReport;
