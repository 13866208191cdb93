//! Onboarding progress tracker.
//!
//! The [`Tracker`] holds the ordered top-level steps of an onboarding flow,
//! the sub-steps of each step, and the index of the step currently in focus.
//! It is an immutable value: every transition in [`transitions`] borrows the
//! current tracker and returns a new one, leaving the original untouched.
//!
//! ```text
//!            tick (automated)             approve
//! Pending ──▶ InProgress ──────────────────────────▶ Completed
//!                 │            ▲
//!                 └── reject ──┘  (status unchanged, view becomes Rejected)
//! ```
//!
//! The tracker keeps these invariants:
//!
//! 1. Steps before the current index are `Completed`, steps after it are
//!    `Pending`
//! 2. At most one step is `InProgress`
//! 3. A completed step has all of its sub-steps completed
//! 4. No status ever moves backwards
//!
//! UI concerns such as "requires approval" or which screen to show are not
//! stored; they are derived from the state through [`Tracker::view`].
//!
//! # Examples
//!
//! ```rust
//! use harvis_core::{FlowDefinition, Status, TrackerBuilder};
//!
//! # fn main() -> harvis_core::Result<()> {
//! let tracker = TrackerBuilder::new(&FlowDefinition::standard()).build()?;
//! let next = tracker.approve()?;
//!
//! assert_eq!(tracker.current_index(), 0);
//! assert_eq!(next.current_index(), 1);
//! assert_eq!(next.steps()[0].status, Status::Completed);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

pub mod builder;
pub mod transitions;

#[cfg(test)]
mod tests;

pub use builder::TrackerBuilder;

use crate::{
    error::{OnboardingError, Result},
    models::{AccountDetails, AccountType, ProgressStatus, Status, Step, StepKind, SubStep},
};

/// Screen derived from the tracker state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// An automated step is running
    Processing,
    /// A review step waits for approve or reject
    AwaitingApproval,
    /// The reviewer declined the current step
    Rejected,
    /// The account step waits for the account type to be confirmed
    AccountSelection,
    /// Every step is completed
    Completed,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Processing => "processing",
            View::AwaitingApproval => "awaiting-approval",
            View::Rejected => "rejected",
            View::AccountSelection => "account-selection",
            View::Completed => "completed",
        }
    }
}

/// State of one onboarding application.
///
/// Deserialization checks the ordering invariants above and fails with
/// `OnboardingError::InvalidFlow` instead of yielding a tracker whose
/// accessors could index out of range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "TrackerState")]
pub struct Tracker {
    pub(crate) steps: Vec<Step>,
    pub(crate) sub_steps: BTreeMap<String, Vec<SubStep>>,
    pub(crate) current: usize,
    pub(crate) customer_name: String,
    pub(crate) account_type: AccountType,
    pub(crate) account: Option<AccountDetails>,
    /// Index of the step whose approval was declined
    pub(crate) declined: Option<usize>,
    pub(crate) on_hold: bool,
}

/// Unchecked serialized form of a [`Tracker`].
#[derive(Deserialize)]
struct TrackerState {
    steps: Vec<Step>,
    #[serde(default)]
    sub_steps: BTreeMap<String, Vec<SubStep>>,
    current: usize,
    customer_name: String,
    #[serde(default)]
    account_type: AccountType,
    #[serde(default)]
    account: Option<AccountDetails>,
    #[serde(default)]
    declined: Option<usize>,
    #[serde(default)]
    on_hold: bool,
}

impl TryFrom<TrackerState> for Tracker {
    type Error = OnboardingError;

    fn try_from(state: TrackerState) -> Result<Self> {
        let len = state.steps.len();
        if len == 0 {
            return Err(OnboardingError::invalid_flow("tracker has no steps"));
        }
        if state.current >= len {
            return Err(OnboardingError::invalid_flow(format!(
                "current index {} is out of range for {len} steps",
                state.current
            )));
        }
        if let Some(declined) = state.declined
            && declined >= len
        {
            return Err(OnboardingError::invalid_flow(format!(
                "declined index {declined} is out of range for {len} steps"
            )));
        }

        let mut ids = HashSet::new();
        for (index, step) in state.steps.iter().enumerate() {
            if !ids.insert(step.id.as_str()) {
                return Err(OnboardingError::invalid_flow(format!(
                    "duplicate step id '{}'",
                    step.id
                )));
            }
            let ordered = match index.cmp(&state.current) {
                std::cmp::Ordering::Less => step.status == Status::Completed,
                std::cmp::Ordering::Equal => true,
                std::cmp::Ordering::Greater => step.status == Status::Pending,
            };
            if !ordered {
                return Err(OnboardingError::invalid_flow(format!(
                    "step '{}' cannot be {} while step {} is current",
                    step.id, step.status, state.current
                )));
            }
        }
        if let Some(unknown) = state.sub_steps.keys().find(|id| !ids.contains(id.as_str())) {
            return Err(OnboardingError::invalid_flow(format!(
                "sub-steps listed for unknown step '{unknown}'"
            )));
        }

        Ok(Tracker {
            steps: state.steps,
            sub_steps: state.sub_steps,
            current: state.current,
            customer_name: state.customer_name,
            account_type: state.account_type,
            account: state.account,
            declined: state.declined,
            on_hold: state.on_hold,
        })
    }
}

impl Tracker {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &Step {
        &self.steps[self.current]
    }

    /// Sub-steps of the step with the given id, empty when it has none.
    pub fn sub_steps_for(&self, step_id: &str) -> &[SubStep] {
        self.sub_steps
            .get(step_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Sub-steps of the current step.
    pub fn current_sub_steps(&self) -> &[SubStep] {
        self.sub_steps_for(&self.current_step().id)
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// The issued account, present once the account step has completed.
    pub fn account(&self) -> Option<&AccountDetails> {
        self.account.as_ref()
    }

    pub fn is_on_hold(&self) -> bool {
        self.on_hold
    }

    /// Whether every step is completed.
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|s| s.status.is_completed())
    }

    /// Number of completed steps.
    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.status.is_completed()).count()
    }

    /// Share of completed steps, rounded to the nearest percent.
    pub fn progress_percentage(&self) -> u8 {
        let ratio = self.completed_steps() as f64 / self.steps.len() as f64;
        (ratio * 100.0).round() as u8
    }

    pub fn progress_status(&self) -> ProgressStatus {
        if self.on_hold {
            ProgressStatus::OnHold
        } else if self.is_complete() {
            ProgressStatus::Completed
        } else {
            ProgressStatus::InProgress
        }
    }

    /// Screen to present for the current state.
    pub fn view(&self) -> View {
        if self.is_complete() {
            return View::Completed;
        }

        let declined = self.declined == Some(self.current);
        match self.current_step().kind {
            StepKind::Automated => View::Processing,
            StepKind::HumanApproval if declined => View::Rejected,
            StepKind::HumanApproval => View::AwaitingApproval,
            StepKind::AccountCreation if declined => View::Rejected,
            StepKind::AccountCreation => View::AccountSelection,
        }
    }

    /// Whether a reviewer decision is pending.
    pub fn requires_approval(&self) -> bool {
        matches!(
            self.view(),
            View::AwaitingApproval | View::AccountSelection
        )
    }

    /// Whether the current step is advanced by timer ticks.
    pub fn is_ticking(&self) -> bool {
        let step = self.current_step();
        step.kind == StepKind::Automated && step.status == Status::InProgress
    }

    /// Whether the next tick will complete the current step.
    pub fn is_final_tick(&self) -> bool {
        self.is_ticking()
            && self
                .current_sub_steps()
                .iter()
                .all(|s| s.status != Status::Pending)
    }

    /// The step preceding the current one, whose output a review screen
    /// presents ("review of OCR Processing").
    pub fn previous_step(&self) -> Option<&Step> {
        self.current
            .checked_sub(1)
            .and_then(|index| self.steps.get(index))
    }
}
