//! Command argument wrappers and their handlers.
//!
//! Each command's clap arguments live in a wrapper struct that converts into
//! the core's own types, so harvis-core stays free of clap attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Types → Tracker / Registry / Session
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use harvis_core::{
    AccountType, Config, CustomerRegistry, Customers, FlowPreset, MockApi, NewCustomer,
    Notification, TrackerBuilder, UploadedDocument,
};
use log::debug;

use crate::renderer::TerminalRenderer;

// ============================================================================
// CLI Argument Wrapper Implementations
// ============================================================================

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// List customers, optionally filtered
    #[command(alias = "l")]
    List(ListCustomersArgs),
    /// Show details of a single customer
    #[command(alias = "s")]
    Show(ShowCustomerArgs),
    /// Add a customer and start their onboarding
    #[command(alias = "a")]
    Add(AddCustomerArgs),
}

/// List customers
#[derive(Args, Default)]
pub struct ListCustomersArgs {
    #[arg(
        short,
        long,
        help = "Case-insensitive match on company name or application ID"
    )]
    pub search: Option<String>,
}

/// Show details of a specific customer
#[derive(Args)]
pub struct ShowCustomerArgs {
    #[arg(help = "Unique identifier of the customer to show")]
    pub id: u64,
}

/// Add a new customer
///
/// The document is checked for type (PDF, DOC, DOCX, JPG, PNG) and size
/// (at most 10 MB); its contents are never read.
#[derive(Args)]
pub struct AddCustomerArgs {
    /// Company or customer name
    pub name: String,
    #[arg(short, long, help = "Identity document to upload")]
    pub document: Option<PathBuf>,
}

impl From<AddCustomerArgs> for NewCustomer {
    /// A document that cannot be found is treated as not uploaded.
    fn from(val: AddCustomerArgs) -> Self {
        let document = val.document.and_then(|path| {
            let metadata = std::fs::metadata(&path).ok()?;
            metadata
                .is_file()
                .then(|| UploadedDocument::from_path(&path, metadata.len()))
        });
        NewCustomer {
            company: val.name,
            document,
        }
    }
}

/// Flow selection shared by `flow` and `run`
#[derive(Args, Default)]
pub struct FlowArgs {
    #[arg(short, long, help = "Built-in flow to use")]
    pub preset: Option<FlowPresetArg>,
    #[arg(long, help = "JSON flow definition, overriding the preset")]
    pub flow_file: Option<PathBuf>,
    #[arg(long, help = "Index of the step to start at")]
    pub start: Option<usize>,
}

impl FlowArgs {
    /// Applies the flags on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(preset) = self.preset {
            config.flow = preset.into();
            config.flow_file = None;
        }
        if let Some(path) = &self.flow_file {
            config.flow_file = Some(path.clone());
        }
    }
}

/// Call a mock endpoint
#[derive(Args)]
pub struct ApiArgs {
    #[arg(help = "Endpoint path: /ocr, /compliance, /aml-check, /approve, /account-creation")]
    pub endpoint: String,
}

/// Run an onboarding session
///
/// Without --auto-approve or --reject the session asks for a decision on
/// stdin at every review step.
#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub flow: FlowArgs,
    #[arg(short, long, help = "Customer ID whose name is used for the account")]
    pub customer: Option<u64>,
    #[arg(long, conflicts_with = "reject", help = "Approve every review")]
    pub auto_approve: bool,
    #[arg(long, help = "Reject the first review")]
    pub reject: bool,
    #[arg(long, help = "Put the application on hold when the session starts")]
    pub hold: bool,
    #[arg(long, help = "Account type to open")]
    pub account_type: Option<AccountTypeArg>,
    #[arg(long, help = "Multiplier for tick delays; 0 runs without waiting")]
    pub delay_scale: Option<f64>,
    #[arg(long, help = "Latency of each mock API call in milliseconds")]
    pub api_delay_ms: Option<u64>,
}

impl RunArgs {
    pub fn apply_to(&self, config: &mut Config) {
        self.flow.apply_to(config);
        if let Some(account_type) = self.account_type {
            config.account_type = account_type.into();
        }
        if let Some(scale) = self.delay_scale {
            config.delay_scale = scale;
        }
        if let Some(delay) = self.api_delay_ms {
            config.api_delay_ms = delay;
        }
    }
}

/// Command-line representation of the built-in flows
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FlowPresetArg {
    /// OCR, review, compliance, final review, account creation
    Standard,
    /// Starts at validation with two review steps
    Express,
}

impl From<FlowPresetArg> for FlowPreset {
    fn from(val: FlowPresetArg) -> Self {
        match val {
            FlowPresetArg::Standard => FlowPreset::Standard,
            FlowPresetArg::Express => FlowPreset::Express,
        }
    }
}

/// Command-line representation of account types
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum AccountTypeArg {
    Savings,
    Current,
}

impl From<AccountTypeArg> for AccountType {
    fn from(val: AccountTypeArg) -> Self {
        match val {
            AccountTypeArg::Savings => AccountType::Savings,
            AccountTypeArg::Current => AccountType::Current,
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Executes commands against the customer registry, flows and mock API.
pub struct Cli {
    pub(crate) config: Config,
    pub(crate) registry: CustomerRegistry,
    pub(crate) renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(config: Config, renderer: TerminalRenderer) -> Self {
        Self {
            config,
            registry: CustomerRegistry::with_sample_data(),
            renderer,
        }
    }

    pub fn handle_customer_command(mut self, command: CustomerCommands) -> Result<()> {
        match command {
            CustomerCommands::List(args) => self.list_customers(&args),
            CustomerCommands::Show(args) => self.show_customer(&args),
            CustomerCommands::Add(args) => self.add_customer(args),
        }
    }

    pub fn list_customers(&self, args: &ListCustomersArgs) -> Result<()> {
        let term = args.search.as_deref().unwrap_or_default();
        let customers = Customers(self.registry.search(term));

        let mut output = String::from("# Customers\n\n");
        output.push_str(&self.registry.counts().to_string());
        output.push('\n');
        output.push_str(&customers.to_string());
        self.renderer.render(&output)
    }

    fn show_customer(&self, args: &ShowCustomerArgs) -> Result<()> {
        let customer = self
            .registry
            .get(args.id)
            .with_context(|| format!("Failed to show customer {}", args.id))?;
        self.renderer.render(&customer.to_string())
    }

    fn add_customer(&mut self, args: AddCustomerArgs) -> Result<()> {
        let form = NewCustomer::from(args);
        match self.registry.add(form) {
            Ok(customer) => {
                self.renderer
                    .notify(&Notification::customer_added(&customer.company))?;
                self.renderer.render(&customer.to_string())
            }
            Err(e) => {
                self.renderer.notify(&Notification::from_error(&e))?;
                Err(e).context("Customer was not added")
            }
        }
    }

    pub fn show_flow(mut self, args: &FlowArgs) -> Result<()> {
        args.apply_to(&mut self.config);
        let flow = self
            .config
            .flow_definition()
            .context("Failed to load flow")?;
        let tracker = TrackerBuilder::new(&flow)
            .starting_at(args.start)
            .with_account_type(self.config.account_type)
            .build()
            .context("Failed to build tracker")?;

        debug!("Showing flow '{}'", flow.name);
        self.renderer.render(&tracker.to_string())
    }

    pub async fn call_api(&self, args: &ApiArgs) -> Result<()> {
        let api = MockApi::new(self.config.api_delay());
        let response = api
            .call_path(&args.endpoint)
            .await
            .with_context(|| format!("Failed to call {}", args.endpoint))?;
        let json = serde_json::to_string_pretty(&response).context("Failed to encode response")?;
        println!("{json}");
        Ok(())
    }
}
