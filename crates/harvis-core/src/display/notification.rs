//! User-facing notifications for reviewer actions and failures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::OnboardingError,
    models::{AccountDetails, AccountType},
};

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Destructive,
}

/// A short message shown to the reviewer after an action.
///
/// # Examples
///
/// ```rust
/// use harvis_core::display::Notification;
///
/// let notice = Notification::approved();
/// assert!(format!("{notice}").contains("Approved"));
///
/// let failure = Notification::request_failed();
/// assert!(failure.is_destructive());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    /// Create a new informational notification.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    /// Create a new destructive notification.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == Variant::Destructive
    }

    pub fn approved() -> Self {
        Self::info("Approved", "Application approved and moved to next step.")
    }

    pub fn rejected() -> Self {
        Self::destructive(
            "Application Rejected",
            "Application has been rejected and flagged for review.",
        )
    }

    pub fn on_hold() -> Self {
        Self::destructive(
            "Application On Hold",
            "Customer onboarding has been paused and flagged for review.",
        )
    }

    pub fn account_type_selected(account_type: AccountType) -> Self {
        Self::info(
            "Account Type Selected",
            format!("{} will be opened.", account_type.label()),
        )
    }

    pub fn account_created(account: &AccountDetails) -> Self {
        Self::info(
            "Account Created Successfully",
            format!(
                "{} {} is ready for {}.",
                account.account_type.label(),
                account.account_number,
                account.customer_name
            ),
        )
    }

    pub fn customer_added(company: &str) -> Self {
        Self::info(
            "Customer Added",
            format!("{company} has been added and onboarding process started."),
        )
    }

    /// Generic notice for a failed backend call.
    pub fn request_failed() -> Self {
        Self::destructive(
            "Something went wrong",
            "The request could not be completed. Please try again.",
        )
    }

    /// Notification for an error: field-level text for validation
    /// failures, the generic notice for backend failures.
    pub fn from_error(error: &OnboardingError) -> Self {
        match error {
            OnboardingError::InvalidInput { field, reason } => {
                let title = match field.as_str() {
                    "customer_name" => "Customer name required",
                    "document" => "Invalid document",
                    _ => "Invalid input",
                };
                Self::destructive(title, reason.clone())
            }
            e if e.is_mock_failure() => Self::request_failed(),
            other => Self::destructive("Error", other.to_string()),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_destructive() { "⚠" } else { "✓" };
        writeln!(f, "{marker} **{}**: {}", self.title, self.description)
    }
}
