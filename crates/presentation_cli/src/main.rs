//! Forecast report CLI
//!
//! Builds a formatted weather forecast report inside a workbook document,
//! filters it, and exports it to Excel.

#![allow(clippy::print_stdout)]

mod args;
mod commands;

use clap::Parser;
use infrastructure::{AppConfig, init_logging};

use crate::args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(cli.config.as_deref())?;
    if let Some(document) = cli.document {
        config.document = document;
    }

    init_logging(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Search { query, pick } => commands::search(&config, query, pick).await,
        Commands::Generate(args) => commands::generate(&config, args).await,
        Commands::Filter(args) => commands::filter(&config, args).await,
        Commands::Conditions => commands::conditions(&config),
        Commands::Export { path } => commands::export(&config, &path),
    }
}
