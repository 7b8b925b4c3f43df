use anyhow::Context;
use clap::Parser;
use tracing::debug;

use tax_cli::{Cli, CliConfig, logging, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::discover(cli.config.as_deref()).context("failed to load configuration")?;

    let mut logging_config = config.logging.clone();
    if let Some(level) = &cli.log_level {
        logging_config.level = level.clone();
    }
    logging::init_logging(&logging_config)?;
    debug!(?config, "configuration loaded");

    let output = run(&cli, &config)?;
    println!("{output}");

    Ok(())
}
