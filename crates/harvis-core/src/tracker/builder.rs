//! Builder for creating Tracker instances from a flow definition.

use std::collections::BTreeMap;

use super::Tracker;
use crate::{
    error::Result,
    models::{AccountType, FlowDefinition, Status, Step},
};

/// Builder for creating and configuring Tracker instances.
#[derive(Debug, Clone)]
pub struct TrackerBuilder {
    flow: FlowDefinition,
    start_index: Option<usize>,
    customer_name: Option<String>,
    account_type: AccountType,
}

impl TrackerBuilder {
    /// Name used on the account record when no customer is given.
    pub const DEFAULT_CUSTOMER: &'static str = "John Doe";

    /// Creates a new builder for the given flow.
    pub fn new(flow: &FlowDefinition) -> Self {
        Self {
            flow: flow.clone(),
            start_index: None,
            customer_name: None,
            account_type: AccountType::default(),
        }
    }

    /// Overrides the flow's own starting step.
    pub fn starting_at(mut self, index: Option<usize>) -> Self {
        if let Some(index) = index {
            self.start_index = Some(index);
        }
        self
    }

    /// Sets the customer the account will be issued to.
    pub fn for_customer(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    /// Preselects the account type.
    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }

    /// Builds the tracker.
    ///
    /// Steps before the starting index begin completed together with their
    /// sub-steps, the starting step begins in progress, and all later steps
    /// begin pending.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::InvalidFlow` if the flow is empty, has
    /// duplicate step ids, or the starting index is out of range
    pub fn build(self) -> Result<Tracker> {
        let mut flow = self.flow;
        if let Some(index) = self.start_index {
            flow.start_index = index;
        }
        flow.validate()?;

        let start = flow.start_index;
        let mut steps = Vec::with_capacity(flow.steps.len());
        let mut sub_steps = BTreeMap::new();

        for (index, definition) in flow.steps.into_iter().enumerate() {
            let status = match index {
                i if i < start => Status::Completed,
                i if i == start => Status::InProgress,
                _ => Status::Pending,
            };

            let mut subs = definition.sub_steps;
            if status == Status::Completed {
                for sub in &mut subs {
                    sub.status = Status::Completed;
                }
            }

            steps.push(Step {
                id: definition.id.clone(),
                title: definition.title,
                status,
                kind: definition.kind,
            });
            sub_steps.insert(definition.id, subs);
        }

        let customer_name = self
            .customer_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_CUSTOMER.to_string());

        let mut tracker = Tracker {
            steps,
            sub_steps,
            current: start,
            customer_name,
            account_type: self.account_type,
            account: None,
            declined: None,
            on_hold: false,
        };
        tracker.start_sub_steps(start)?;

        Ok(tracker)
    }
}
