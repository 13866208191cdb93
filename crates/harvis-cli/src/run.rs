//! The `run` command: drives an onboarding session in the terminal.

use anyhow::{Context, Result, bail};
use harvis_core::{
    Notification, OnboardingSession, SessionBuilder, Snapshot, TrackerBuilder, View,
};
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::cli::{Cli, RunArgs};

/// Reviewer decision at a review step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Approve,
    Reject,
    Hold,
    Quit,
}

impl Decision {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "a" | "approve" => Some(Decision::Approve),
            "r" | "reject" => Some(Decision::Reject),
            "h" | "hold" => Some(Decision::Hold),
            "q" | "quit" => Some(Decision::Quit),
            _ => None,
        }
    }
}

/// Where decisions come from.
enum Reviewer {
    Auto(Decision),
    Prompt(Lines<BufReader<Stdin>>),
}

impl Reviewer {
    async fn decide(&mut self, snapshot: &Snapshot) -> Result<Decision> {
        let lines = match self {
            Reviewer::Auto(decision) => return Ok(*decision),
            Reviewer::Prompt(lines) => lines,
        };

        let question = match snapshot.tracker.view() {
            View::AccountSelection => format!(
                "Create {}? [a]pprove, [r]eject, [h]old, [q]uit: ",
                snapshot.tracker.account_type()
            ),
            _ => "[a]pprove, [r]eject, [h]old, [q]uit: ".to_string(),
        };

        loop {
            print!("{question}");
            std::io::Write::flush(&mut std::io::stdout()).context("Failed to flush stdout")?;

            let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
                return Ok(Decision::Quit);
            };
            if let Some(decision) = Decision::parse(&line) {
                return Ok(decision);
            }
        }
    }

    fn is_interactive(&self) -> bool {
        matches!(self, Reviewer::Prompt(_))
    }
}

impl Cli {
    pub async fn run(mut self, args: RunArgs) -> Result<()> {
        args.apply_to(&mut self.config);

        let customer_name = match args.customer {
            Some(id) => self
                .registry
                .get(id)
                .with_context(|| format!("Failed to find customer {id}"))?
                .company
                .clone(),
            None => TrackerBuilder::DEFAULT_CUSTOMER.to_string(),
        };

        let session = SessionBuilder::from_config(&self.config)
            .context("Invalid configuration")?
            .starting_at(args.flow.start)
            .for_customer(customer_name)
            .spawn()
            .context("Failed to start onboarding session")?;

        let mut reviewer = if args.auto_approve {
            Reviewer::Auto(Decision::Approve)
        } else if args.reject {
            Reviewer::Auto(Decision::Reject)
        } else {
            Reviewer::Prompt(BufReader::new(tokio::io::stdin()).lines())
        };

        if args.hold {
            let notice = session.put_on_hold().await?;
            self.renderer.notify(&notice)?;
        }

        let result = self.drive(&session, &mut reviewer).await;
        session.shutdown().await.context("Failed to stop session")?;
        result
    }

    async fn drive(&self, session: &OnboardingSession, reviewer: &mut Reviewer) -> Result<()> {
        loop {
            let snapshot = session
                .wait_for(|s| s.halted || s.tracker.view() != View::Processing)
                .await?;
            self.renderer.render(&snapshot.tracker.to_string())?;

            if snapshot.halted {
                self.renderer.notify(&Notification::request_failed())?;
                bail!("Onboarding stopped after a failed backend call");
            }

            match snapshot.tracker.view() {
                View::Completed => {
                    info!("Onboarding completed for {}", snapshot.tracker.customer_name());
                    return Ok(());
                }
                View::Rejected => return Ok(()),
                View::Processing => continue,
                View::AwaitingApproval | View::AccountSelection => {}
            }

            let decision = reviewer.decide(&snapshot).await?;
            debug!("Decision at '{}': {decision:?}", snapshot.tracker.current_step().id);

            let outcome = match decision {
                Decision::Approve if snapshot.tracker.view() == View::AccountSelection => {
                    session.confirm_account(snapshot.tracker.account_type()).await
                }
                Decision::Approve => session.approve().await,
                Decision::Reject => session.reject().await,
                Decision::Hold => session.put_on_hold().await,
                Decision::Quit => return Ok(()),
            };

            match outcome {
                Ok(notice) => self.renderer.notify(&notice)?,
                // State is unchanged, so the same review comes round again
                Err(e) if reviewer.is_interactive() && e.is_mock_failure() => {
                    self.renderer.notify(&Notification::from_error(&e))?;
                }
                Err(e) => return Err(e).context("Review action failed"),
            }
        }
    }
}
