//! Display formatting for terminal output.
//!
//! Domain models implement `Display` directly (see [`models`]) and produce
//! markdown; collections go through newtype wrappers so empty lists and
//! tables are formatted in one place.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Display Wrappers│    │   Markdown      │
//! │ (Tracker, ...)  │───▶│ & Notifications │───▶│   (termimad)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Customer table (Customers)
//! - [`notification`]: Reviewer notifications (Notification)
//! - [`datetime`]: Date formatting
//! - [`progress`]: Text progress bar
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use harvis_core::{FlowDefinition, TrackerBuilder, display::Notification};
//!
//! let tracker = TrackerBuilder::new(&FlowDefinition::standard())
//!     .for_customer("Global Logistics")
//!     .build()
//!     .unwrap();
//! assert!(format!("{tracker}").contains("# Onboarding: Global Logistics"));
//!
//! println!("{}", Notification::on_hold());
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod notification;
pub mod progress;

pub use collections::Customers;
pub use datetime::DisplayDate;
pub use notification::{Notification, Variant};
pub use progress::ProgressBar;
