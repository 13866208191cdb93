use jiff::civil::{Date, date};

use super::*;
use crate::{
    error::OnboardingError,
    models::{FlowDefinition, StepDefinition},
};

const TODAY: Date = date(2025, 3, 14);

fn standard() -> Tracker {
    TrackerBuilder::new(&FlowDefinition::standard())
        .build()
        .expect("standard flow builds")
}

fn step_statuses(tracker: &Tracker) -> Vec<Status> {
    tracker.steps().iter().map(|s| s.status).collect()
}

fn sub_statuses(tracker: &Tracker, step_id: &str) -> Vec<Status> {
    tracker.sub_steps_for(step_id).iter().map(|s| s.status).collect()
}

/// Ticks until the current step stops ticking.
fn run_ticks(mut tracker: Tracker) -> Tracker {
    while tracker.is_ticking() {
        tracker = tracker.tick().expect("tick succeeds while ticking");
    }
    tracker
}

#[test]
fn test_initial_state_starts_first_step() {
    use Status::*;

    let tracker = standard();
    assert_eq!(tracker.current_index(), 0);
    assert_eq!(
        step_statuses(&tracker),
        vec![InProgress, Pending, Pending, Pending, Pending]
    );
    assert_eq!(
        sub_statuses(&tracker, "ocr"),
        vec![Completed, InProgress, Pending, Pending]
    );
    assert_eq!(tracker.view(), View::Processing);
    assert!(!tracker.requires_approval());
    assert_eq!(tracker.customer_name(), TrackerBuilder::DEFAULT_CUSTOMER);
}

#[test]
fn test_initial_state_at_designated_start() {
    use Status::*;

    for start in 0..5 {
        let tracker = TrackerBuilder::new(&FlowDefinition::standard())
            .starting_at(Some(start))
            .build()
            .unwrap();

        assert_eq!(tracker.current_index(), start);
        for (index, step) in tracker.steps().iter().enumerate() {
            let expected = match index {
                i if i < start => Completed,
                i if i == start => InProgress,
                _ => Pending,
            };
            assert_eq!(step.status, expected, "step {index} with start {start}");
            if index < start {
                assert!(
                    tracker.sub_steps_for(&step.id).iter().all(|s| s.status == Completed),
                    "sub-steps of completed step {index}"
                );
            }
        }

        let running = tracker.steps().iter().filter(|s| s.status == InProgress).count();
        assert_eq!(running, 1);
    }
}

#[test]
fn test_starting_step_begins_its_first_sub_step() {
    let tracker = TrackerBuilder::new(&FlowDefinition::standard())
        .starting_at(Some(2))
        .build()
        .unwrap();

    use Status::*;
    assert_eq!(
        sub_statuses(&tracker, "compliance"),
        vec![InProgress, Pending, Pending, Pending]
    );
}

#[test]
fn test_builder_rejects_out_of_range_start() {
    let result = TrackerBuilder::new(&FlowDefinition::standard())
        .starting_at(Some(5))
        .build();
    assert!(matches!(result, Err(OnboardingError::InvalidFlow { .. })));
}

#[test]
fn test_blank_customer_name_falls_back_to_default() {
    let tracker = TrackerBuilder::new(&FlowDefinition::standard())
        .for_customer("   ")
        .build()
        .unwrap();
    assert_eq!(tracker.customer_name(), "John Doe");
}

#[test]
fn test_single_approve_from_initial_state() {
    use Status::*;

    let tracker = standard();
    let next = tracker.approve_on(TODAY).unwrap();

    assert_eq!(
        step_statuses(&next),
        vec![Completed, InProgress, Pending, Pending, Pending]
    );
    assert_eq!(next.current_index(), 1);

    // The original value is untouched
    assert_eq!(tracker.current_index(), 0);
    assert_eq!(tracker.steps()[0].status, InProgress);
}

#[test]
fn test_first_tick_advances_ocr_sub_steps() {
    use Status::*;

    let next = standard().tick().unwrap();
    assert_eq!(
        sub_statuses(&next, "ocr"),
        vec![Completed, Completed, InProgress, Pending]
    );
    assert_eq!(next.current_index(), 0);
}

#[test]
fn test_final_tick_completes_step_and_starts_next() {
    use Status::*;

    let tracker = standard().tick().unwrap().tick().unwrap();
    assert!(tracker.is_final_tick());

    let next = tracker.tick().unwrap();
    assert_eq!(sub_statuses(&next, "ocr"), vec![Completed; 4]);
    assert_eq!(
        step_statuses(&next),
        vec![Completed, InProgress, Pending, Pending, Pending]
    );
    assert_eq!(
        sub_statuses(&next, "human-approval"),
        vec![InProgress, Pending]
    );
    assert_eq!(next.view(), View::AwaitingApproval);
    assert!(next.requires_approval());
    assert_eq!(next.previous_step().map(|s| s.id.as_str()), Some("ocr"));
}

#[test]
fn test_tick_outside_automated_step_is_an_error() {
    let tracker = run_ticks(standard());
    assert!(matches!(
        tracker.tick(),
        Err(OnboardingError::NothingToAdvance { ref step }) if step == "human-approval"
    ));
}

#[test]
fn test_approve_before_last_step_starts_next() {
    for start in 0..3 {
        let tracker = TrackerBuilder::new(&FlowDefinition::standard())
            .starting_at(Some(start))
            .build()
            .unwrap();
        let next = tracker.approve_on(TODAY).unwrap();

        assert_eq!(next.steps()[start].status, Status::Completed);
        assert_eq!(next.steps()[start + 1].status, Status::InProgress);
        assert_eq!(next.current_index(), start + 1);
        assert!(next.account().is_none());
    }
}

#[test]
fn test_approve_into_account_step_issues_account() {
    let tracker = TrackerBuilder::new(&FlowDefinition::standard())
        .starting_at(Some(3))
        .for_customer("Global Logistics")
        .with_account_type(AccountType::Current)
        .build()
        .unwrap();

    let next = tracker.approve_on(TODAY).unwrap();

    assert!(next.is_complete());
    assert_eq!(next.current_index(), 4);
    assert_eq!(sub_statuses(&next, "account"), vec![Status::Completed; 2]);
    assert_eq!(next.view(), View::Completed);
    assert_eq!(next.progress_percentage(), 100);

    let account = next.account().expect("account issued");
    assert_eq!(account.account_number, "4716-8935-2401");
    assert_eq!(account.account_type, AccountType::Current);
    assert_eq!(account.customer_name, "Global Logistics");
    assert_eq!(account.created_on, TODAY);
}

#[test]
fn test_approve_at_last_account_step_issues_account() {
    let tracker = TrackerBuilder::new(&FlowDefinition::standard())
        .starting_at(Some(4))
        .build()
        .unwrap();
    assert_eq!(tracker.view(), View::AccountSelection);
    assert!(tracker.requires_approval());

    let next = tracker.approve_on(TODAY).unwrap();
    assert_eq!(next.steps()[4].status, Status::Completed);
    assert!(next.account().is_some());
    assert!(next.is_complete());
}

#[test]
fn test_approve_on_complete_flow_is_an_error() {
    let done = TrackerBuilder::new(&FlowDefinition::standard())
        .starting_at(Some(4))
        .build()
        .unwrap()
        .approve_on(TODAY)
        .unwrap();

    assert!(matches!(done.approve_on(TODAY), Err(OnboardingError::FlowComplete)));
    assert!(matches!(done.reject(), Err(OnboardingError::FlowComplete)));
}

#[test]
fn test_confirm_account_selects_type_then_approves() {
    let tracker = TrackerBuilder::new(&FlowDefinition::standard())
        .starting_at(Some(4))
        .build()
        .unwrap();

    let next = tracker.confirm_account(AccountType::Current, TODAY).unwrap();
    assert_eq!(
        next.account().map(|a| a.account_type),
        Some(AccountType::Current)
    );
    assert!(next.select_account_type(AccountType::Savings).is_err());

    // Only valid on the account selection screen
    assert!(matches!(
        standard().confirm_account(AccountType::Current, TODAY),
        Err(OnboardingError::NotAwaitingApproval { .. })
    ));
}

#[test]
fn test_reject_never_changes_step_statuses() {
    let trackers = [
        run_ticks(standard()),
        TrackerBuilder::new(&FlowDefinition::standard())
            .starting_at(Some(3))
            .build()
            .unwrap(),
        TrackerBuilder::new(&FlowDefinition::standard())
            .starting_at(Some(4))
            .build()
            .unwrap(),
        TrackerBuilder::new(&FlowDefinition::express()).build().unwrap(),
    ];

    for tracker in trackers {
        let rejected = tracker.reject().unwrap();
        assert_eq!(step_statuses(&rejected), step_statuses(&tracker));
        assert_eq!(rejected.current_index(), tracker.current_index());
        assert_eq!(rejected.view(), View::Rejected);
        assert!(!rejected.requires_approval());
    }
}

#[test]
fn test_reject_without_pending_decision_is_an_error() {
    assert!(matches!(
        standard().reject(),
        Err(OnboardingError::NotAwaitingApproval { ref step }) if step == "ocr"
    ));
}

#[test]
fn test_approve_after_reject_continues() {
    let rejected = run_ticks(standard()).reject().unwrap();
    let next = rejected.approve_on(TODAY).unwrap();

    assert_eq!(next.current_step().id, "compliance");
    assert_eq!(next.view(), View::Processing);
}

#[test]
fn test_put_on_hold_only_sets_marker() {
    let tracker = run_ticks(standard());
    let held = tracker.put_on_hold();

    assert_eq!(step_statuses(&held), step_statuses(&tracker));
    assert_eq!(held.view(), tracker.view());
    assert!(held.is_on_hold());
    assert_eq!(held.progress_status(), ProgressStatus::OnHold);
    assert_eq!(tracker.progress_status(), ProgressStatus::InProgress);
}

#[test]
fn test_backward_step_transition_is_rejected() {
    let mut tracker = standard().approve_on(TODAY).unwrap();
    let err = tracker.set_step_status(0, Status::InProgress).unwrap_err();
    assert!(matches!(
        err,
        OnboardingError::InvalidTransition { from: Status::Completed, to: Status::InProgress, .. }
    ));
}

#[test]
fn test_full_standard_flow() {
    let mut tracker = standard();
    let mut approvals = 0;

    while !tracker.is_complete() {
        tracker = if tracker.is_ticking() {
            tracker.tick().unwrap()
        } else {
            approvals += 1;
            tracker.approve_on(TODAY).unwrap()
        };

        // At most one step is ever in progress
        let running = tracker
            .steps()
            .iter()
            .filter(|s| s.status == Status::InProgress)
            .count();
        assert!(running <= 1);
    }

    assert_eq!(approvals, 2);
    assert_eq!(tracker.completed_steps(), 5);
    assert!(tracker.account().is_some());
    assert_eq!(tracker.progress_status(), ProgressStatus::Completed);
}

#[test]
fn test_express_flow() {
    use Status::*;

    let tracker = TrackerBuilder::new(&FlowDefinition::express()).build().unwrap();
    assert_eq!(tracker.current_index(), 2);
    assert_eq!(tracker.progress_percentage(), 40);
    assert_eq!(tracker.view(), View::AwaitingApproval);
    assert_eq!(
        sub_statuses(&tracker, "validation"),
        vec![Completed, InProgress, Pending]
    );

    let compliance = tracker.approve_on(TODAY).unwrap();
    assert_eq!(compliance.current_step().id, "compliance");
    assert_eq!(compliance.progress_percentage(), 60);

    let done = compliance.approve_on(TODAY).unwrap();
    assert!(done.is_complete());
    assert!(done.account().is_some());
}

#[test]
fn test_ticking_into_account_step_waits_for_selection() {
    let flow = FlowDefinition {
        name: "short".to_string(),
        start_index: 0,
        steps: vec![
            StepDefinition {
                id: "scan".to_string(),
                title: "Scan".to_string(),
                kind: StepKind::Automated,
                tick_delay_ms: 10,
                endpoint: None,
                sub_steps: vec![SubStep::new("read", "Read")],
            },
            StepDefinition {
                id: "account".to_string(),
                title: "Account".to_string(),
                kind: StepKind::AccountCreation,
                tick_delay_ms: 10,
                endpoint: None,
                sub_steps: Vec::new(),
            },
        ],
    };

    let tracker = TrackerBuilder::new(&flow).build().unwrap();
    let next = run_ticks(tracker);

    assert_eq!(next.current_step().id, "account");
    assert_eq!(next.view(), View::AccountSelection);
    assert!(next.account().is_none());
    assert!(!next.is_complete());
}

#[test]
fn test_sub_step_lookup_for_unknown_step_is_empty() {
    assert!(standard().sub_steps_for("missing").is_empty());
}

#[test]
fn test_serialized_tracker_restores() {
    let tracker = standard().approve_on(TODAY).unwrap().reject().unwrap();
    let value = serde_json::to_value(&tracker).unwrap();

    let restored: Tracker = serde_json::from_value(value).unwrap();
    assert_eq!(restored, tracker);
    assert_eq!(restored.view(), View::Rejected);
}

#[test]
fn test_deserialize_rejects_out_of_range_current() {
    let mut value = serde_json::to_value(standard()).unwrap();
    value["current"] = serde_json::json!(9);

    let err = serde_json::from_value::<Tracker>(value).unwrap_err();
    assert!(err.to_string().contains("current index 9 is out of range"));
}

#[test]
fn test_deserialize_rejects_out_of_order_statuses() {
    let mut value = serde_json::to_value(standard()).unwrap();
    value["steps"][2]["status"] = serde_json::to_value(Status::Completed).unwrap();

    let err = serde_json::from_value::<Tracker>(value).unwrap_err();
    assert!(err.to_string().contains("step 'compliance' cannot be"));
}

#[test]
fn test_deserialize_rejects_empty_and_unknown_sub_steps() {
    let mut empty = serde_json::to_value(standard()).unwrap();
    empty["steps"] = serde_json::json!([]);
    assert!(serde_json::from_value::<Tracker>(empty).is_err());

    let mut stray = serde_json::to_value(standard()).unwrap();
    stray["sub_steps"]["ghost"] = serde_json::json!([]);
    let err = serde_json::from_value::<Tracker>(stray).unwrap_err();
    assert!(err.to_string().contains("unknown step 'ghost'"));
}
