//! Harvis CLI Application
//!
//! Command-line interface for the Harvis onboarding tracker.

mod args;
mod cli;
mod renderer;
mod run;

use Commands::*;
use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{Cli, ListCustomersArgs};
use harvis_core::ConfigLoader;
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        config,
        no_color,
        command,
    } = Args::parse();

    let config = ConfigLoader::new()
        .with_path(config)
        .load()
        .context("Failed to load configuration")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Harvis started");

    let cli = Cli::new(config, renderer);
    match command {
        Some(Customers { command }) => cli.handle_customer_command(command),
        Some(Flow(args)) => cli.show_flow(&args),
        Some(Api(args)) => cli.call_api(&args).await,
        Some(Run(args)) => cli.run(args).await,
        None => cli.list_customers(&ListCustomersArgs::default()),
    }
}
