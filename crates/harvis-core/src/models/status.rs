//! Status enumerations for steps, sub-steps and overall progress.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OnboardingError, Result};

/// Type-safe enumeration of step and sub-step statuses.
///
/// Statuses only move forward: `Pending → InProgress → Completed`, with
/// `Pending → Completed` allowed when a stage is skipped over.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Not started yet
    #[default]
    Pending,

    /// Currently being processed
    InProgress,

    /// Finished
    Completed,
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "in-progress" | "inprogress" | "in_progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            _ => Err(format!("Invalid status: {s}")),
        }
    }
}

impl Status {
    /// Convert to the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }

    /// Whether moving from `self` to `target` keeps the status moving forward.
    ///
    /// Staying on the same status is allowed and treated as a no-op.
    pub fn can_transition_to(&self, target: Status) -> bool {
        target >= *self
    }

    /// Validate and apply a transition for the entity named `id`.
    pub fn transition(self, id: &str, target: Status) -> Result<Status> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(OnboardingError::InvalidTransition {
                id: id.to_string(),
                from: self,
                to: target,
            })
        }
    }

    /// Whether this status is terminal.
    pub fn is_completed(&self) -> bool {
        matches!(self, Status::Completed)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use harvis_core::models::Status;
    ///
    /// assert_eq!(Status::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(Status::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(Status::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            Status::Completed => "✓ Completed",
            Status::InProgress => "➤ In Progress",
            Status::Pending => "○ Pending",
        }
    }
}

/// Overall progress indicator shown above the stepper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressStatus {
    InProgress,
    Completed,
    OnHold,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::InProgress => "in-progress",
            ProgressStatus::Completed => "completed",
            ProgressStatus::OnHold => "on-hold",
        }
    }
}
