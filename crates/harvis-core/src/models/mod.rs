//! Data models for the onboarding flow.
//!
//! This module contains the domain types that make up an onboarding session:
//! steps and sub-steps with their forward-only [`Status`], the static
//! [`FlowDefinition`]s trackers are built from, the issued
//! [`AccountDetails`], and the [`Customer`] records listed on the dashboard.
//! Display implementations for these models live in
//! [`crate::display::models`] to keep presentation separate from the data.
//!
//! # Examples
//!
//! ```rust
//! use harvis_core::models::{FlowDefinition, Status, StepKind};
//!
//! let flow = FlowDefinition::standard();
//! assert_eq!(flow.steps.len(), 5);
//! assert_eq!(flow.steps[0].kind, StepKind::Automated);
//! assert_eq!(flow.steps[0].sub_steps[0].status, Status::Completed);
//! ```

pub mod account;
pub mod customer;
pub mod flow;
pub mod status;
pub mod step;


pub use account::{AccountDetails, AccountState, AccountType};
pub use customer::{
    Customer, CustomerCounts, CustomerStatus, DocumentType, NewCustomer, UploadedDocument,
};
pub use flow::{FlowDefinition, FlowPreset, StepDefinition};
pub use status::{ProgressStatus, Status};
pub use step::{Step, StepKind, SubStep};
