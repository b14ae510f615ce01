//! `musicscrape` command-line front end.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use musicscrape::ScrapeConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.log_json)?;

    let mut config = ScrapeConfig::from_env();
    if cli.quiet {
        config.log_diagnostics = false;
    }

    commands::run(&cli.command, &config, cli.json).await
}

/// Logs go to stderr so `--json` output stays parseable.
fn init_tracing(verbose: bool, json: bool) -> Result<()> {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if verbose {
        filter = filter.add_directive("musicscrape=debug".parse()?);
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
