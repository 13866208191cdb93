#![allow(dead_code)]

use std::{path::PathBuf, time::Duration};

use harvis_core::{FlowDefinition, MockApi, OnboardingSession, SessionBuilder};
use tempfile::TempDir;

/// Upper bound for waits under paused time; only reached when a test hangs.
pub const WAIT_LIMIT: Duration = Duration::from_secs(120);

/// Helper function to spawn a session whose mock calls return immediately
pub fn spawn_test_session(flow: FlowDefinition) -> OnboardingSession {
    spawn_with_api(flow, MockApi::new(Duration::ZERO))
}

/// Helper function to spawn a session with a specific mock API
pub fn spawn_with_api(flow: FlowDefinition, api: MockApi) -> OnboardingSession {
    SessionBuilder::new(flow)
        .for_customer("Global Logistics")
        .with_api(api)
        .spawn()
        .expect("Failed to spawn session")
}

/// Helper function to write a file into a fresh temporary directory
pub fn write_temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write temp file");
    (temp_dir, path)
}
