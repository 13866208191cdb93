//! Step and sub-step model definitions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Status;

/// What moves a step forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    /// Advanced by timer ticks simulating backend work
    #[default]
    Automated,

    /// Waits for a reviewer to approve or reject
    HumanApproval,

    /// Terminal step that issues the account
    AccountCreation,
}

impl FromStr for StepKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "automated" => Ok(StepKind::Automated),
            "human-approval" | "approval" => Ok(StepKind::HumanApproval),
            "account-creation" | "account" => Ok(StepKind::AccountCreation),
            _ => Err(format!("Invalid step kind: {s}")),
        }
    }
}

/// Represents a top-level onboarding stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    /// Stable identifier, also the key into the sub-step map
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Current status of the step
    pub status: Status,

    /// Which stimulus advances the step
    #[serde(default)]
    pub kind: StepKind,
}

/// Represents a finer-grained task within a step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubStep {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub status: Status,

    /// Short explanation shown under the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SubStep {
    /// Creates a pending sub-step.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: Status::Pending,
            description: None,
        }
    }

    /// Sets the initial status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
