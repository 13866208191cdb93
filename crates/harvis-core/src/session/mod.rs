//! Asynchronous onboarding session.
//!
//! An [`OnboardingSession`] runs a [`Tracker`] inside a driver task on the
//! tokio runtime. The driver is the only writer: reviewer commands arrive
//! over an mpsc channel, timer ticks come from a single armed deadline, and
//! both are serialised through one `select!` loop.
//!
//! ```text
//! ┌──────────────────┐  Command   ┌──────────────────┐  call   ┌─────────┐
//! │ OnboardingSession│───────────▶│      Driver      │────────▶│ MockApi │
//! │ (handle)         │◀───────────│ (owns Tracker,   │◀────────│         │
//! └──────────────────┘  watch /   │  tick deadline)  │         └─────────┘
//!                       broadcast └──────────────────┘
//! ```
//!
//! Dropping the session aborts the driver, which drops any armed deadline,
//! so a pending tick can never mutate state after teardown.
//!
//! # Examples
//!
//! ```rust,no_run
//! use harvis_core::{FlowDefinition, SessionBuilder};
//!
//! # async fn example() -> harvis_core::Result<()> {
//! let session = SessionBuilder::new(FlowDefinition::standard())
//!     .for_customer("Global Logistics")
//!     .spawn()?;
//!
//! // Wait for the OCR step to finish, then approve the document review
//! session.wait_for(|s| s.tracker.requires_approval()).await?;
//! let notice = session.approve().await?;
//! println!("{notice}");
//!
//! session.shutdown().await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use serde::Serialize;
use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    task::JoinHandle,
};

mod driver;


use driver::{Command, Driver, Reply};

use crate::{
    config::Config,
    display::Notification,
    error::{OnboardingError, Result, ResultExt},
    mock_api::{MockApi, MockResponse},
    models::{AccountType, FlowDefinition},
    tracker::{Tracker, TrackerBuilder},
};

/// State published after every change.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tracker: Tracker,
    /// Responses of the mock calls made so far, in call order
    pub results: Vec<MockResponse>,
    /// Set when a backend call failed and the timers stopped
    pub halted: bool,
}

/// Event stream item for subscribers.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Updated(Snapshot),
    Notified(Notification),
}

/// Builder for creating and starting onboarding sessions.
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    flow: FlowDefinition,
    start_index: Option<usize>,
    customer_name: Option<String>,
    account_type: AccountType,
    api: MockApi,
    delay_scale: f64,
}

impl SessionBuilder {
    const COMMAND_BUFFER: usize = 16;
    const EVENT_BUFFER: usize = 64;

    /// Creates a builder for the given flow with default timing.
    pub fn new(flow: FlowDefinition) -> Self {
        Self {
            flow,
            start_index: None,
            customer_name: None,
            account_type: AccountType::default(),
            api: MockApi::default(),
            delay_scale: 1.0,
        }
    }

    /// Creates a builder from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.flow_definition()?)
            .with_api(MockApi::new(config.api_delay()))
            .with_delay_scale(config.delay_scale)
            .with_account_type(config.account_type))
    }

    pub fn starting_at(mut self, index: Option<usize>) -> Self {
        if index.is_some() {
            self.start_index = index;
        }
        self
    }

    pub fn for_customer(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }

    pub fn with_api(mut self, api: MockApi) -> Self {
        self.api = api;
        self
    }

    /// Scales every tick delay; 0 makes ticks fire without waiting.
    pub fn with_delay_scale(mut self, scale: f64) -> Self {
        self.delay_scale = scale;
        self
    }

    /// Builds the tracker and starts the driver task.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::InvalidFlow` if the tracker cannot be built
    /// and `OnboardingError::Configuration` for an invalid delay scale
    pub fn spawn(self) -> Result<OnboardingSession> {
        Config::check_delay_scale(self.delay_scale)?;

        let mut tracker = TrackerBuilder::new(&self.flow)
            .starting_at(self.start_index)
            .with_account_type(self.account_type);
        if let Some(name) = self.customer_name {
            tracker = tracker.for_customer(name);
        }
        let tracker = tracker.build()?;

        let snapshot = Snapshot {
            tracker,
            results: Vec::new(),
            halted: false,
        };

        let (command_tx, command_rx) = mpsc::channel(Self::COMMAND_BUFFER);
        let (state_tx, state_rx) = watch::channel(snapshot.clone());
        let (event_tx, _) = broadcast::channel(Self::EVENT_BUFFER);

        let driver = Driver {
            flow: self.flow,
            snapshot,
            api: self.api,
            delay_scale: self.delay_scale,
            deadline: None,
            commands: command_rx,
            state: state_tx,
            events: event_tx.clone(),
        };
        let handle = tokio::spawn(driver.run());

        Ok(OnboardingSession {
            commands: command_tx,
            state: state_rx,
            events: event_tx,
            driver: Some(handle),
        })
    }
}

/// Handle to a running onboarding session.
pub struct OnboardingSession {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<Snapshot>,
    events: broadcast::Sender<SessionEvent>,
    driver: Option<JoinHandle<()>>,
}

impl OnboardingSession {
    /// Latest published state.
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// Receives every update and notification published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Waits until the published state satisfies `predicate`, checking the
    /// current state first.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::SessionClosed` if the driver stops first
    pub async fn wait_for<F>(&self, predicate: F) -> Result<Snapshot>
    where
        F: FnMut(&Snapshot) -> bool,
    {
        let mut state = self.state.clone();
        let snapshot = state
            .wait_for(predicate)
            .await
            .map_err(|_| OnboardingError::SessionClosed)?;
        Ok(snapshot.clone())
    }

    /// Like [`wait_for`](Self::wait_for) but gives up after `limit`,
    /// returning `None`.
    pub async fn wait_for_within<F>(&self, limit: Duration, predicate: F) -> Result<Option<Snapshot>>
    where
        F: FnMut(&Snapshot) -> bool,
    {
        match tokio::time::timeout(limit, self.wait_for(predicate)).await {
            Ok(result) => result.map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Approves the current step after a call to `/approve`.
    pub async fn approve(&self) -> Result<Notification> {
        self.request(Command::Approve).await
    }

    /// Declines the pending review.
    pub async fn reject(&self) -> Result<Notification> {
        self.request(Command::Reject).await
    }

    /// Flags the application as on hold.
    pub async fn put_on_hold(&self) -> Result<Notification> {
        self.request(Command::PutOnHold).await
    }

    /// Records the account type for the account to be issued.
    pub async fn select_account_type(&self, account_type: AccountType) -> Result<Notification> {
        self.request(|reply| Command::SelectAccountType(account_type, reply))
            .await
    }

    /// Confirms the account type on the account selection screen, issuing
    /// the account.
    pub async fn confirm_account(&self, account_type: AccountType) -> Result<Notification> {
        self.request(|reply| Command::ConfirmAccount(account_type, reply))
            .await
    }

    /// Stops the driver and waits for it to finish.
    pub async fn shutdown(mut self) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        if self.commands.send(Command::Shutdown(done_tx)).await.is_ok() {
            let _ = done_rx.await;
        }
        if let Some(handle) = self.driver.take() {
            handle.await.with_context("Session driver join error")?;
        }
        Ok(())
    }

    async fn request<F>(&self, command: F) -> Result<Notification>
    where
        F: FnOnce(Reply) -> Command,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(command(reply_tx))
            .await
            .map_err(|_| OnboardingError::SessionClosed)?;
        reply_rx.await.map_err(|_| OnboardingError::SessionClosed)?
    }
}

impl Drop for OnboardingSession {
    fn drop(&mut self) {
        if let Some(handle) = self.driver.take() {
            handle.abort();
        }
    }
}
