use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pricewatch::application::{Cli, CommandExecutor};
use pricewatch::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Priority: CLI args > config file > defaults
    let config = Config::load(cli.config.as_deref())?;

    CommandExecutor::execute(cli.command, config).await?;
    Ok(())
}
