mod common;

use harvis_core::{
    Config, ConfigLoader, FlowDefinition, FlowPreset, OnboardingError, Status, StepKind,
    TrackerBuilder, View,
};

#[test]
fn test_flow_file_round_trip_through_config() {
    let json = serde_json::to_string_pretty(&FlowDefinition::express()).unwrap();
    let (_temp_dir, flow_path) = common::write_temp_file("flow.json", &json);

    let config = Config {
        flow_file: Some(flow_path),
        ..Config::default()
    };
    let flow = config.flow_definition().expect("Failed to load flow file");
    assert_eq!(flow, FlowDefinition::express());

    let tracker = TrackerBuilder::new(&flow).build().unwrap();
    assert_eq!(tracker.current_step().id, "validation");
}

#[test]
fn test_custom_flow_file_drives_tracker() {
    let (_temp_dir, flow_path) = common::write_temp_file(
        "flow.json",
        r#"{
            "name": "kyc-lite",
            "steps": [
                { "id": "scan", "title": "Scan ID", "tick_delay_ms": 100,
                  "sub_steps": [
                      { "id": "upload", "title": "Upload", "status": "completed" },
                      { "id": "read", "title": "Read" }
                  ] },
                { "id": "review", "title": "Review", "kind": "human-approval" },
                { "id": "account", "title": "Open Account", "kind": "account-creation" }
            ]
        }"#,
    );

    let flow = FlowDefinition::from_path(&flow_path).expect("Failed to load flow");
    assert_eq!(flow.steps[1].kind, StepKind::HumanApproval);

    let tracker = TrackerBuilder::new(&flow).build().unwrap();
    assert_eq!(tracker.current_sub_steps()[1].status, Status::InProgress);

    let review = tracker.tick().unwrap();
    assert_eq!(review.view(), View::AwaitingApproval);

    let done = review.approve().unwrap();
    assert!(done.is_complete());
    assert!(done.account().is_some());
}

#[test]
fn test_invalid_flow_file_is_rejected() {
    let (_temp_dir, flow_path) =
        common::write_temp_file("flow.json", r#"{ "name": "empty", "steps": [] }"#);
    assert!(matches!(
        FlowDefinition::from_path(&flow_path),
        Err(OnboardingError::InvalidFlow { .. })
    ));

    let (_temp_dir, garbage) = common::write_temp_file("flow.json", "not json");
    assert!(matches!(
        FlowDefinition::from_path(&garbage),
        Err(OnboardingError::Serialization { .. })
    ));
}

#[test]
fn test_config_selects_preset() {
    let (_temp_dir, config_path) =
        common::write_temp_file("config.json", r#"{ "flow": "express" }"#);

    let config = ConfigLoader::new()
        .with_path(Some(&config_path))
        .load()
        .expect("Failed to load config");
    assert_eq!(config.flow, FlowPreset::Express);

    let tracker = TrackerBuilder::new(&config.flow_definition().unwrap())
        .build()
        .unwrap();
    assert_eq!(tracker.progress_percentage(), 40);
}
