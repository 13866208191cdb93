use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ApiArgs, CustomerCommands, FlowArgs, RunArgs};

/// Command-line interface for the Harvis onboarding tracker
///
/// Harvis follows a customer application through the onboarding pipeline:
/// OCR of the submitted documents, human review, compliance and AML checks,
/// a final review, and the creation of the bank account. Automated stages
/// advance on timers against a local mock backend; review stages wait for
/// an approve or reject decision.
#[derive(Parser)]
#[command(version, about, name = "harvis")]
pub struct Args {
    /// Path to the JSON configuration file. Defaults to
    /// $XDG_CONFIG_HOME/harvis/config.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Harvis CLI
///
/// Without a command the customer list is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Browse and add customers
    #[command(alias = "c")]
    Customers {
        #[command(subcommand)]
        command: CustomerCommands,
    },
    /// Show the initial state of an onboarding flow
    #[command(alias = "f")]
    Flow(FlowArgs),
    /// Call a mock API endpoint and print the JSON response
    Api(ApiArgs),
    /// Run an onboarding session to completion
    #[command(alias = "r")]
    Run(RunArgs),
}
