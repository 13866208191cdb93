//! Pure state transitions for the Tracker.
//!
//! Each public method takes `&self` and returns a new [`Tracker`]; an error
//! leaves the caller with the unchanged original.

use jiff::{Zoned, civil::Date};

use super::{Tracker, View};
use crate::{
    error::{OnboardingError, Result},
    models::{AccountDetails, AccountType, Status, StepKind},
};

impl Tracker {
    /// Advance the current automated step by one timer firing.
    ///
    /// The running sub-step completes and the next pending one starts. Once
    /// every sub-step is completed the step itself completes and the next
    /// step starts.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::NothingToAdvance` when the current step is
    /// not an automated step in progress
    pub fn tick(&self) -> Result<Tracker> {
        if !self.is_ticking() {
            return Err(OnboardingError::NothingToAdvance {
                step: self.current_step().id.clone(),
            });
        }

        let mut next = self.clone();
        let index = next.current;
        let step_id = next.steps[index].id.clone();

        if let Some(subs) = next.sub_steps.get_mut(&step_id)
            && let Some(running) = subs.iter_mut().find(|s| s.status == Status::InProgress)
        {
            running.status = running.status.transition(&running.id, Status::Completed)?;
        }
        next.start_sub_steps(index)?;

        if next.current_sub_steps().iter().all(|s| s.status.is_completed()) {
            next.advance(None)?;
        }

        Ok(next)
    }

    /// Approve the current step using today's date for any issued account.
    pub fn approve(&self) -> Result<Tracker> {
        self.approve_on(Zoned::now().date())
    }

    /// Approve the current step.
    ///
    /// Completes the current step and starts the next one. Entering the
    /// account-creation step issues the account and completes it at once;
    /// approving the account-creation step itself does the same.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::FlowComplete` when every step is already
    /// completed
    pub fn approve_on(&self, date: Date) -> Result<Tracker> {
        if self.is_complete() {
            return Err(OnboardingError::FlowComplete);
        }

        let mut next = self.clone();
        next.advance(Some(date))?;
        Ok(next)
    }

    /// Decline the pending review.
    ///
    /// No step status changes; the tracker only stops asking for approval.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::NotAwaitingApproval` when no decision is
    /// pending, or `OnboardingError::FlowComplete` on a finished flow
    pub fn reject(&self) -> Result<Tracker> {
        if self.is_complete() {
            return Err(OnboardingError::FlowComplete);
        }
        if !self.requires_approval() {
            return Err(OnboardingError::NotAwaitingApproval {
                step: self.current_step().id.clone(),
            });
        }

        let mut next = self.clone();
        next.declined = Some(next.current);
        Ok(next)
    }

    /// Flag the application as on hold. Step statuses are not touched.
    pub fn put_on_hold(&self) -> Tracker {
        let mut next = self.clone();
        next.on_hold = true;
        next
    }

    /// Record the account type chosen for the account to be issued.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::InvalidInput` once the account is issued
    pub fn select_account_type(&self, account_type: AccountType) -> Result<Tracker> {
        if self.account.is_some() {
            return Err(OnboardingError::invalid_input("account_type")
                .with_reason("account has already been issued"));
        }

        let mut next = self.clone();
        next.account_type = account_type;
        Ok(next)
    }

    /// Confirm the account type on the account selection screen and issue
    /// the account.
    pub fn confirm_account(&self, account_type: AccountType, date: Date) -> Result<Tracker> {
        if self.view() != View::AccountSelection {
            return Err(OnboardingError::NotAwaitingApproval {
                step: self.current_step().id.clone(),
            });
        }

        self.select_account_type(account_type)?.approve_on(date)
    }

    /// Complete the current step and move to the next one.
    ///
    /// With `issue_on` set, an account-creation step reached this way is
    /// completed immediately with the account issued on that date.
    fn advance(&mut self, issue_on: Option<Date>) -> Result<()> {
        let from = self.current;
        self.complete_step(from)?;
        self.declined = None;

        if from + 1 < self.steps.len() {
            self.current = from + 1;
            self.set_step_status(self.current, Status::InProgress)?;
            self.start_sub_steps(self.current)?;

            if let Some(date) = issue_on
                && self.steps[self.current].kind == StepKind::AccountCreation
            {
                self.complete_step(self.current)?;
                self.issue_account(date);
            }
        } else if let Some(date) = issue_on
            && self.steps[from].kind == StepKind::AccountCreation
        {
            self.issue_account(date);
        }

        Ok(())
    }

    fn issue_account(&mut self, date: Date) {
        self.account = Some(AccountDetails::issue(
            &self.customer_name,
            self.account_type,
            date,
        ));
    }

    pub(crate) fn set_step_status(&mut self, index: usize, status: Status) -> Result<()> {
        let step = &mut self.steps[index];
        step.status = step.status.transition(&step.id, status)?;
        Ok(())
    }

    /// Completes a step together with every one of its sub-steps.
    fn complete_step(&mut self, index: usize) -> Result<()> {
        self.set_step_status(index, Status::Completed)?;
        if let Some(subs) = self.sub_steps.get_mut(&self.steps[index].id) {
            for sub in subs.iter_mut() {
                sub.status = sub.status.transition(&sub.id, Status::Completed)?;
            }
        }
        Ok(())
    }

    /// Starts the first pending sub-step of a step unless one is running.
    pub(crate) fn start_sub_steps(&mut self, index: usize) -> Result<()> {
        let Some(subs) = self.sub_steps.get_mut(&self.steps[index].id) else {
            return Ok(());
        };

        if subs.iter().any(|s| s.status == Status::InProgress) {
            return Ok(());
        }
        if let Some(first) = subs.iter_mut().find(|s| s.status == Status::Pending) {
            first.status = first.status.transition(&first.id, Status::InProgress)?;
        }
        Ok(())
    }
}
