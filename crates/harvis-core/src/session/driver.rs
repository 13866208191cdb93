//! The task that owns a session's tracker.

use std::{ops::ControlFlow, time::Duration};

use jiff::Zoned;
use log::{debug, info, warn};
use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    time::{Instant, sleep_until},
};

use super::{SessionEvent, Snapshot};
use crate::{
    display::Notification,
    error::Result,
    mock_api::{Endpoint, MockApi},
    models::{AccountType, FlowDefinition},
    tracker::Tracker,
};

pub(crate) type Reply = oneshot::Sender<Result<Notification>>;

pub(crate) enum Command {
    Approve(Reply),
    Reject(Reply),
    PutOnHold(Reply),
    SelectAccountType(AccountType, Reply),
    ConfirmAccount(AccountType, Reply),
    Shutdown(oneshot::Sender<()>),
}

pub(crate) struct Driver {
    pub(crate) flow: FlowDefinition,
    pub(crate) snapshot: Snapshot,
    pub(crate) api: MockApi,
    pub(crate) delay_scale: f64,
    /// Next tick; `None` while no automated step is running
    pub(crate) deadline: Option<Instant>,
    pub(crate) commands: mpsc::Receiver<Command>,
    pub(crate) state: watch::Sender<Snapshot>,
    pub(crate) events: broadcast::Sender<SessionEvent>,
}

impl Driver {
    pub(crate) async fn run(mut self) {
        info!(
            "Onboarding session started for {} at step '{}'",
            self.snapshot.tracker.customer_name(),
            self.snapshot.tracker.current_step().id
        );

        loop {
            self.arm();
            let deadline = self.deadline;

            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        debug!("All session handles dropped");
                        break;
                    };
                    if self.handle(command).await.is_break() {
                        break;
                    }
                }
                _ = wait_until(deadline) => {
                    self.deadline = None;
                    self.on_tick().await;
                }
            }
        }

        info!("Onboarding session stopped");
    }

    /// Arms the tick deadline if the current step is automated. An armed
    /// deadline is left alone so commands do not postpone the next tick.
    fn arm(&mut self) {
        if self.deadline.is_some() || self.snapshot.halted {
            return;
        }
        if !self.snapshot.tracker.is_ticking() {
            return;
        }

        let step_id = &self.snapshot.tracker.current_step().id;
        let Some(deadline) = scaled_delay(self.tick_delay(), self.delay_scale)
            .and_then(|delay| Instant::now().checked_add(delay))
        else {
            warn!("Tick delay for '{step_id}' is out of range, halting timers");
            self.snapshot.halted = true;
            self.publish();
            self.notify(Notification::request_failed());
            return;
        };
        debug!(
            "Next tick for '{step_id}' in {:?}",
            deadline.saturating_duration_since(Instant::now())
        );
        self.deadline = Some(deadline);
    }

    /// Moves to `next`, dropping a deadline armed for a step that is no
    /// longer current.
    fn replace_tracker(&mut self, next: Tracker) {
        if next.current_index() != self.snapshot.tracker.current_index() {
            self.deadline = None;
        }
        self.snapshot.tracker = next;
    }

    fn tick_delay(&self) -> Duration {
        let id = &self.snapshot.tracker.current_step().id;
        self.flow
            .step(id)
            .map(|step| step.tick_delay())
            .unwrap_or_default()
    }

    fn endpoint_for_current(&self) -> Option<Endpoint> {
        let id = &self.snapshot.tracker.current_step().id;
        self.flow.step(id).and_then(|step| step.endpoint)
    }

    async fn on_tick(&mut self) {
        if self.snapshot.tracker.is_final_tick()
            && let Some(endpoint) = self.endpoint_for_current()
        {
            match self.api.call(endpoint).await {
                Ok(response) => self.snapshot.results.push(response),
                Err(e) => {
                    warn!("Halting timers: {e}");
                    self.snapshot.halted = true;
                    self.publish();
                    self.notify(Notification::request_failed());
                    return;
                }
            }
        }

        match self.snapshot.tracker.tick() {
            Ok(next) => {
                if next.current_index() != self.snapshot.tracker.current_index() {
                    info!(
                        "Step '{}' completed",
                        self.snapshot.tracker.current_step().id
                    );
                }
                self.replace_tracker(next);
                self.publish();
            }
            Err(e) => warn!("Tick ignored: {e}"),
        }
    }

    async fn handle(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Approve(reply) => {
                let result = self.approve(None).await;
                let _ = reply.send(result);
            }
            Command::ConfirmAccount(account_type, reply) => {
                let result = self.approve(Some(account_type)).await;
                let _ = reply.send(result);
            }
            Command::Reject(reply) => {
                let result = self.apply(Tracker::reject, Notification::rejected());
                if result.is_ok() {
                    info!(
                        "Rejected at step '{}'",
                        self.snapshot.tracker.current_step().id
                    );
                }
                let _ = reply.send(result);
            }
            Command::PutOnHold(reply) => {
                let result = self.apply(|t| Ok(t.put_on_hold()), Notification::on_hold());
                info!("Application for {} put on hold", self.snapshot.tracker.customer_name());
                let _ = reply.send(result);
            }
            Command::SelectAccountType(account_type, reply) => {
                let result = self.apply(
                    |t| t.select_account_type(account_type),
                    Notification::account_type_selected(account_type),
                );
                let _ = reply.send(result);
            }
            Command::Shutdown(done) => {
                let _ = done.send(());
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Applies a local transition and publishes it.
    fn apply<F>(&mut self, transition: F, notification: Notification) -> Result<Notification>
    where
        F: FnOnce(&Tracker) -> Result<Tracker>,
    {
        let next = transition(&self.snapshot.tracker)?;
        self.replace_tracker(next);
        self.publish();
        self.notify(notification.clone());
        Ok(notification)
    }

    /// Approves the current step once `/approve` succeeds, and records the
    /// `/account-creation` response when an account gets issued.
    ///
    /// A failed call emits the generic failure notice and leaves the state
    /// unchanged.
    async fn approve(&mut self, account_type: Option<AccountType>) -> Result<Notification> {
        let today = Zoned::now().date();
        let current = &self.snapshot.tracker;
        let next = match account_type {
            Some(account_type) => current.confirm_account(account_type, today)?,
            None => current.approve_on(today)?,
        };
        let issued = current.account().is_none() && next.account().is_some();

        let mut responses = Vec::new();
        let mut endpoints = vec![Endpoint::Approve];
        if issued {
            endpoints.push(Endpoint::AccountCreation);
        }
        for endpoint in endpoints {
            match self.api.call(endpoint).await {
                Ok(response) => responses.push(response),
                Err(e) => {
                    warn!("Approval of '{}' failed: {e}", current.current_step().id);
                    self.notify(Notification::request_failed());
                    return Err(e);
                }
            }
        }

        info!("Approved step '{}'", current.current_step().id);
        self.snapshot.results.extend(responses);
        self.replace_tracker(next);
        self.publish();

        let notification = match self.snapshot.tracker.account() {
            Some(account) if issued => {
                info!("Issued {} account {}", account.account_type.as_str(), account.account_number);
                Notification::account_created(account)
            }
            _ => Notification::approved(),
        };
        self.notify(notification.clone());
        Ok(notification)
    }

    fn publish(&self) {
        self.state.send_replace(self.snapshot.clone());
        // No subscribers is fine
        let _ = self.events.send(SessionEvent::Updated(self.snapshot.clone()));
    }

    fn notify(&self, notification: Notification) {
        let _ = self.events.send(SessionEvent::Notified(notification));
    }
}

/// `delay × scale`, or `None` when the product is not a valid duration.
fn scaled_delay(delay: Duration, scale: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(delay.as_secs_f64() * scale).ok()
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
