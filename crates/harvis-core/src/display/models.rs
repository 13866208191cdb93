//! Display implementations for domain models.
//!
//! This module contains the Display trait implementations for the core
//! domain models, kept apart from the model definitions. Output is markdown
//! meant for the terminal renderer.

use std::fmt;

use super::{datetime::DisplayDate, progress::ProgressBar};
use crate::{
    mock_api::ComplianceReport,
    models::{
        AccountDetails, AccountType, Customer, CustomerCounts, CustomerStatus, ProgressStatus,
        Status, Step, SubStep,
    },
    tracker::{Tracker, View},
};

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProgressStatus::InProgress => "In Progress",
            ProgressStatus::Completed => "Completed",
            ProgressStatus::OnHold => "On Hold",
        };
        f.write_str(label)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- {} ({})", self.title, self.status.with_icon())
    }
}

impl fmt::Display for SubStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  - {} ({})", self.title, self.status.with_icon())?;
        if let Some(desc) = &self.description {
            write!(f, ": {desc}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for AccountDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Account Created")?;
        writeln!(f)?;
        writeln!(f, "- **Account Number**: {}", self.account_number)?;
        writeln!(f, "- **Account Type**: {}", self.account_type)?;
        writeln!(f, "- **Customer**: {}", self.customer_name)?;
        writeln!(f, "- **Branch Code**: {}", self.branch_code)?;
        writeln!(f, "- **Created**: {}", DisplayDate(&self.created_on))?;
        writeln!(f, "- **Status**: Active")
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} (ID: {})", self.company, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Application**: {}", self.application_id)?;
        writeln!(f, "- **Status**: {}", self.status)?;
        writeln!(f, "- **Current Stage**: {}", self.current_stage)?;
        writeln!(f, "- **Submitted**: {}", DisplayDate(&self.submission_date))?;
        writeln!(f, "- **Last Updated**: {}", DisplayDate(&self.last_updated))
    }
}

impl fmt::Display for CustomerCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "**Total**: {} | **In Progress**: {} | **Completed**: {} | **On Hold**: {}",
            self.total, self.in_progress, self.completed, self.on_hold
        )
    }
}

impl fmt::Display for ComplianceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Compliance Checks")?;
        writeln!(f)?;
        for check in &self.checks {
            writeln!(f, "- **{}**: {}", check.title, check.outcome.label())?;
            writeln!(f, "  {}", check.details)?;
        }
        for alert in self.alerts().filter_map(|c| c.alert.as_deref()) {
            writeln!(f)?;
            writeln!(f, "> {alert}")?;
        }
        Ok(())
    }
}

impl Tracker {
    /// One-line prompt for the current view.
    fn prompt(&self) -> String {
        let step = &self.current_step().title;
        match self.view() {
            View::Processing => format!("Processing {step}..."),
            View::AwaitingApproval => match self.previous_step() {
                Some(previous) => format!(
                    "{step}: review of {} is required. Approve or reject.",
                    previous.title
                ),
                None => format!("{step}: review is required. Approve or reject."),
            },
            View::Rejected => format!("Application rejected at {step}."),
            View::AccountSelection => format!(
                "Select an account type to create the account ({} selected).",
                self.account_type()
            ),
            View::Completed => "Onboarding completed.".to_string(),
        }
    }
}

impl fmt::Display for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Onboarding: {}", self.customer_name())?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Progress**: {} ({}/{} steps)",
            ProgressBar::new(self.progress_percentage()),
            self.completed_steps(),
            self.steps().len()
        )?;
        writeln!(f, "- **Status**: {}", self.progress_status())?;

        writeln!(f, "\n## Steps")?;
        writeln!(f)?;
        for (index, step) in self.steps().iter().enumerate() {
            write!(f, "{step}")?;
            if index == self.current_index() && step.status != Status::Completed {
                for sub in self.current_sub_steps() {
                    write!(f, "{sub}")?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "> {}", self.prompt())?;

        if let Some(account) = self.account() {
            writeln!(f)?;
            write!(f, "{account}")?;
        }
        Ok(())
    }
}
