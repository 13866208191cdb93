//! Core library for the Harvis onboarding tracker.
//!
//! This crate models a bank's customer onboarding pipeline: an ordered list
//! of steps with sub-steps, advanced by timers for automated work and by a
//! reviewer's approve or reject for human checks, ending with the issue of a
//! bank account.
//!
//! # Layers
//!
//! - **Tracker** ([`tracker`]): immutable state with pure transitions
//!   (`tick`, `approve`, `reject`, `put_on_hold`) and a derived [`View`]
//! - **Session** ([`session`]): a tokio task that owns a tracker, drives its
//!   timers, and serialises reviewer commands
//! - **Mock API** ([`mock_api`]): canned backend responses after a delay
//! - **Customers** ([`customers`]): the in-memory dashboard registry
//! - **Display** ([`display`]): markdown formatting for the terminal
//!
//! # Quick Start
//!
//! ```rust
//! use harvis_core::{FlowDefinition, TrackerBuilder, View};
//!
//! # fn main() -> harvis_core::Result<()> {
//! let tracker = TrackerBuilder::new(&FlowDefinition::standard())
//!     .for_customer("Global Logistics")
//!     .build()?;
//! assert_eq!(tracker.view(), View::Processing);
//!
//! // Three ticks finish the OCR step and open the first review
//! let tracker = tracker.tick()?.tick()?.tick()?;
//! assert_eq!(tracker.view(), View::AwaitingApproval);
//!
//! let tracker = tracker.approve()?;
//! assert_eq!(tracker.current_step().id, "compliance");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod customers;
pub mod display;
pub mod error;
pub mod mock_api;
pub mod models;
pub mod session;
pub mod tracker;

// Re-export commonly used types
pub use config::{Config, ConfigLoader};
pub use customers::CustomerRegistry;
pub use display::{Customers, DisplayDate, Notification};
pub use error::{OnboardingError, Result};
pub use mock_api::{Endpoint, MockApi, MockResponse};
pub use models::{
    AccountDetails, AccountType, Customer, CustomerCounts, CustomerStatus, FlowDefinition,
    FlowPreset, NewCustomer, ProgressStatus, Status, Step, StepKind, SubStep, UploadedDocument,
};
pub use session::{OnboardingSession, SessionBuilder, SessionEvent, Snapshot};
pub use tracker::{Tracker, TrackerBuilder, View};
