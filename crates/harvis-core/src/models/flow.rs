//! Static flow definitions that trackers are built from.

use std::{collections::HashSet, path::Path, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use super::{Status, StepKind, SubStep};
use crate::{
    error::{OnboardingError, Result},
    mock_api::Endpoint,
};

/// Definition of one top-level step and its sub-steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub kind: StepKind,
    /// Delay between timer ticks for automated steps
    #[serde(default = "default_tick_delay_ms")]
    pub tick_delay_ms: u64,
    /// Mock endpoint called when an automated step finishes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    #[serde(default)]
    pub sub_steps: Vec<SubStep>,
}

fn default_tick_delay_ms() -> u64 {
    2000
}

impl StepDefinition {
    fn new(id: &str, title: &str, kind: StepKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            tick_delay_ms: default_tick_delay_ms(),
            endpoint: None,
            sub_steps: Vec::new(),
        }
    }

    fn ticking_every(mut self, millis: u64) -> Self {
        self.tick_delay_ms = millis;
        self
    }

    fn calling(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    fn with_sub_steps(mut self, sub_steps: Vec<SubStep>) -> Self {
        self.sub_steps = sub_steps;
        self
    }

    /// Tick delay as a duration.
    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_delay_ms)
    }
}

/// Ordered list of steps plus the index the flow starts at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowDefinition {
    pub name: String,
    #[serde(default)]
    pub start_index: usize,
    pub steps: Vec<StepDefinition>,
}

impl FlowDefinition {
    /// The five-stage flow of the customer progress view: OCR, review,
    /// compliance and AML, final review, account creation.
    pub fn standard() -> Self {
        use StepKind::*;

        Self {
            name: "standard".to_string(),
            start_index: 0,
            steps: vec![
                StepDefinition::new("ocr", "OCR Processing", Automated)
                    .ticking_every(2000)
                    .calling(Endpoint::Ocr)
                    .with_sub_steps(vec![
                        SubStep::new("loading-pdf", "Loading PDF").with_status(Status::Completed),
                        SubStep::new("ocr-processing", "OCR Processing")
                            .with_status(Status::InProgress),
                        SubStep::new("extracting-data", "Extracting Data"),
                        SubStep::new("storing-results", "Storing Results"),
                    ]),
                StepDefinition::new("human-approval", "Human Approval", HumanApproval)
                    .with_sub_steps(vec![
                        SubStep::new("document-review", "Document Review"),
                        SubStep::new("data-validation", "Data Validation"),
                    ]),
                StepDefinition::new("compliance", "Compliance & AML", Automated)
                    .ticking_every(1000)
                    .calling(Endpoint::Compliance)
                    .with_sub_steps(vec![
                        SubStep::new("sanctions-screening", "Sanctions & PEP screening"),
                        SubStep::new("adverse-media", "Adverse media checks"),
                        SubStep::new("identity-verification", "Identity verification"),
                        SubStep::new("risk-assessment", "Risk assessment"),
                    ]),
                StepDefinition::new("final-approval", "Human Approval", HumanApproval)
                    .with_sub_steps(vec![
                        SubStep::new("compliance-review", "Compliance Review"),
                        SubStep::new("final-validation", "Final Validation"),
                    ]),
                StepDefinition::new("account", "Account Creation", AccountCreation)
                    .with_sub_steps(vec![
                        SubStep::new("account-generation", "Account Generation"),
                        SubStep::new("welcome-communication", "Welcome Communication"),
                    ]),
            ],
        }
    }

    /// The single-screen dashboard flow, opened at the validation stage.
    pub fn express() -> Self {
        use StepKind::*;

        Self {
            name: "express".to_string(),
            start_index: 2,
            steps: vec![
                StepDefinition::new("upload", "Upload", Automated).with_sub_steps(vec![
                    SubStep::new("doc-upload", "Document Upload")
                        .with_description("Identity documents received"),
                    SubStep::new("doc-verify", "Document Verification")
                        .with_description("Documents verified successfully"),
                ]),
                StepDefinition::new("ocr", "OCR", Automated)
                    .calling(Endpoint::Ocr)
                    .with_sub_steps(vec![
                        SubStep::new("text-extract", "Text Extraction")
                            .with_description("OCR processing completed"),
                        SubStep::new("data-parse", "Data Parsing")
                            .with_description("Customer data extracted"),
                    ]),
                StepDefinition::new("validation", "Validation", HumanApproval).with_sub_steps(
                    vec![
                        SubStep::new("data-validate", "Data Validation")
                            .with_status(Status::Completed)
                            .with_description("Customer information validated"),
                        SubStep::new("identity-check", "Identity Verification")
                            .with_status(Status::InProgress)
                            .with_description("Checking against identity databases"),
                        SubStep::new("address-verify", "Address Verification")
                            .with_description("Address validation pending"),
                    ],
                ),
                StepDefinition::new("compliance", "Compliance", HumanApproval).with_sub_steps(
                    vec![
                        SubStep::new("kyc-check", "KYC Screening")
                            .with_description("Know Your Customer checks"),
                        SubStep::new("aml-scan", "AML Screening")
                            .with_description("Anti-Money Laundering checks"),
                        SubStep::new("sanctions-check", "Sanctions Check")
                            .with_description("Sanctions list verification"),
                    ],
                ),
                StepDefinition::new("account", "Account Creation", AccountCreation)
                    .with_sub_steps(vec![
                        SubStep::new("account-gen", "Generate Account")
                            .with_description("Create customer account"),
                        SubStep::new("welcome-email", "Welcome Communication")
                            .with_description("Send welcome email and materials"),
                    ]),
            ],
        }
    }

    /// Loads a flow from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| OnboardingError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let flow: FlowDefinition = serde_json::from_str(&contents)?;
        flow.validate()?;
        Ok(flow)
    }

    /// Checks the structural rules every tracker relies on.
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(OnboardingError::invalid_flow("flow has no steps"));
        }

        let mut seen = HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.id.as_str()) {
                return Err(OnboardingError::invalid_flow(format!(
                    "duplicate step id '{}'",
                    step.id
                )));
            }
        }

        if self.start_index >= self.steps.len() {
            return Err(OnboardingError::invalid_flow(format!(
                "start index {} is out of range for {} steps",
                self.start_index,
                self.steps.len()
            )));
        }

        Ok(())
    }

    /// Looks up a step definition by id.
    pub fn step(&self, id: &str) -> Option<&StepDefinition> {
        self.steps.iter().find(|s| s.id == id)
    }
}

/// Built-in flows selectable by name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlowPreset {
    #[default]
    Standard,
    Express,
}

impl FlowPreset {
    pub fn definition(&self) -> FlowDefinition {
        match self {
            FlowPreset::Standard => FlowDefinition::standard(),
            FlowPreset::Express => FlowDefinition::express(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowPreset::Standard => "standard",
            FlowPreset::Express => "express",
        }
    }
}

impl FromStr for FlowPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(FlowPreset::Standard),
            "express" => Ok(FlowPreset::Express),
            _ => Err(format!("Invalid flow preset: {s}")),
        }
    }
}
