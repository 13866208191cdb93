//! Local stand-in for the onboarding backend.
//!
//! [`MockApi`] maps an endpoint path to a canned response after a fixed
//! delay. It is not a wire contract; it exists so the session can exercise
//! the same request/response shape a real integration would have.

use std::{collections::HashSet, fmt, str::FromStr, time::Duration};

use jiff::Zoned;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{OnboardingError, Result},
    models::{AccountDetails, AccountType},
    tracker::TrackerBuilder,
};

/// Known mock endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum Endpoint {
    Ocr,
    Compliance,
    AmlCheck,
    Approve,
    AccountCreation,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Ocr,
        Endpoint::Compliance,
        Endpoint::AmlCheck,
        Endpoint::Approve,
        Endpoint::AccountCreation,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Ocr => "/ocr",
            Endpoint::Compliance => "/compliance",
            Endpoint::AmlCheck => "/aml-check",
            Endpoint::Approve => "/approve",
            Endpoint::AccountCreation => "/account-creation",
        }
    }
}

impl FromStr for Endpoint {
    type Err = OnboardingError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = format!("/{}", s.trim().trim_start_matches('/').to_lowercase());
        Endpoint::ALL
            .into_iter()
            .find(|e| e.path() == normalized)
            .ok_or_else(|| OnboardingError::UnknownEndpoint {
                endpoint: s.to_string(),
            })
    }
}

impl TryFrom<String> for Endpoint {
    type Error = OnboardingError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Endpoint> for String {
    fn from(value: Endpoint) -> Self {
        value.path().to_string()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Fields read from the scanned application form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OcrExtraction {
    pub name: String,
    pub address: String,
    pub date_of_birth: String,
    pub id_number: String,
    pub document_type: String,
    /// Recognition confidence in percent
    pub confidence: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CheckOutcome {
    Pass,
    Fail,
    NeedsReview,
}

impl CheckOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CheckOutcome::Pass => "Pass",
            CheckOutcome::Fail => "Fail",
            CheckOutcome::NeedsReview => "Needs Review",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceCheck {
    pub id: String,
    pub title: String,
    pub description: String,
    pub outcome: CheckOutcome,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceReport {
    pub checks: Vec<ComplianceCheck>,
}

impl ComplianceReport {
    /// Whether every check passed.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.outcome == CheckOutcome::Pass)
    }

    /// Checks that need a reviewer's attention.
    pub fn alerts(&self) -> impl Iterator<Item = &ComplianceCheck> {
        self.checks.iter().filter(|c| c.outcome != CheckOutcome::Pass)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AmlScreening {
    pub risk_level: RiskLevel,
    pub sanctions_matches: u32,
    pub pep_matches: u32,
    pub adverse_media_hits: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApprovalReceipt {
    pub approved: bool,
    pub reference: String,
}

/// Canned payload returned by an endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MockResponse {
    Ocr(OcrExtraction),
    Compliance(ComplianceReport),
    AmlCheck(AmlScreening),
    Approval(ApprovalReceipt),
    AccountCreation(AccountDetails),
}

impl MockResponse {
    /// The fixed response for an endpoint.
    pub fn canned(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Ocr => MockResponse::Ocr(OcrExtraction {
                name: "John Doe".to_string(),
                address: "123 Main Street, Anytown, USA 12345".to_string(),
                date_of_birth: "1985-06-15".to_string(),
                id_number: "EX1234578".to_string(),
                document_type: "Driver License".to_string(),
                confidence: 94,
            }),
            Endpoint::Compliance => MockResponse::Compliance(ComplianceReport {
                checks: vec![
                    ComplianceCheck {
                        id: "kyc".to_string(),
                        title: "KYC (Know Your Customer)".to_string(),
                        description: "Verification of customer identity using official \
                                      documents and biometric data."
                            .to_string(),
                        outcome: CheckOutcome::Pass,
                        details: "All identity documents verified successfully".to_string(),
                        alert: None,
                    },
                    ComplianceCheck {
                        id: "sanctions".to_string(),
                        title: "Sanctions Screening".to_string(),
                        description: "Screening against global sanctions lists, Politically \
                                      Exposed Persons (PEPs), and adverse media."
                            .to_string(),
                        outcome: CheckOutcome::Pass,
                        details: "No matches found in sanctions databases".to_string(),
                        alert: None,
                    },
                    ComplianceCheck {
                        id: "transaction".to_string(),
                        title: "Transaction Monitoring".to_string(),
                        description: "Analysis of expected transaction patterns to flag \
                                      unusual or suspicious activities."
                            .to_string(),
                        outcome: CheckOutcome::Fail,
                        details: "Unusual transaction patterns detected.".to_string(),
                        alert: Some(
                            "Action Required: Unusual transaction patterns detected. Further \
                             investigation is needed."
                                .to_string(),
                        ),
                    },
                ],
            }),
            Endpoint::AmlCheck => MockResponse::AmlCheck(AmlScreening {
                risk_level: RiskLevel::Medium,
                sanctions_matches: 0,
                pep_matches: 0,
                adverse_media_hits: 0,
            }),
            Endpoint::Approve => MockResponse::Approval(ApprovalReceipt {
                approved: true,
                reference: "APR-2025-0001".to_string(),
            }),
            Endpoint::AccountCreation => MockResponse::AccountCreation(AccountDetails::issue(
                TrackerBuilder::DEFAULT_CUSTOMER,
                AccountType::default(),
                Zoned::now().date(),
            )),
        }
    }
}

/// Simulated backend with a fixed latency.
#[derive(Debug, Clone)]
pub struct MockApi {
    delay: Duration,
    failing: HashSet<Endpoint>,
}

impl MockApi {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    /// Creates an API answering every endpoint after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failing: HashSet::new(),
        }
    }

    /// Makes calls to `endpoint` fail.
    pub fn failing_on(mut self, endpoint: Endpoint) -> Self {
        self.failing.insert(endpoint);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Calls an endpoint and waits for the canned response.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::MockCallFailed` for endpoints configured to
    /// fail
    pub async fn call(&self, endpoint: Endpoint) -> Result<MockResponse> {
        debug!("Mock call {endpoint} (delay {:?})", self.delay);
        tokio::time::sleep(self.delay).await;

        if self.failing.contains(&endpoint) {
            warn!("Mock call {endpoint} failed");
            return Err(OnboardingError::MockCallFailed {
                endpoint: endpoint.path().to_string(),
            });
        }

        Ok(MockResponse::canned(endpoint))
    }

    /// Calls an endpoint given by its path.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::UnknownEndpoint` if the path matches no
    /// endpoint
    pub async fn call_path(&self, path: &str) -> Result<MockResponse> {
        let endpoint: Endpoint = path.parse()?;
        self.call(endpoint).await
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_parsing_accepts_paths_and_bare_names() {
        assert_eq!("/ocr".parse::<Endpoint>().unwrap(), Endpoint::Ocr);
        assert_eq!("aml-check".parse::<Endpoint>().unwrap(), Endpoint::AmlCheck);
        assert_eq!(
            " /Account-Creation ".parse::<Endpoint>().unwrap(),
            Endpoint::AccountCreation
        );
        assert!(matches!(
            "/unknown".parse::<Endpoint>(),
            Err(OnboardingError::UnknownEndpoint { .. })
        ));
    }

    #[test]
    fn test_compliance_report_flags_transaction_monitoring() {
        let MockResponse::Compliance(report) = MockResponse::canned(Endpoint::Compliance) else {
            panic!("expected compliance report");
        };
        assert!(!report.passed());
        let alerts: Vec<_> = report.alerts().map(|c| c.id.as_str()).collect();
        assert_eq!(alerts, vec!["transaction"]);
    }

    #[test]
    fn test_endpoint_serializes_as_path() {
        let json = serde_json::to_string(&Endpoint::AmlCheck).unwrap();
        assert_eq!(json, "\"/aml-check\"");
        let back: Endpoint = serde_json::from_str("\"/approve\"").unwrap();
        assert_eq!(back, Endpoint::Approve);
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_waits_for_delay_and_returns_canned_response() {
        let api = MockApi::new(Duration::from_millis(1500));
        let start = tokio::time::Instant::now();

        let response = api.call(Endpoint::Ocr).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert!(matches!(response, MockResponse::Ocr(ref ocr) if ocr.name == "John Doe"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_endpoint_returns_mock_failure() {
        let api = MockApi::default().failing_on(Endpoint::Approve);

        let err = api.call_path("/approve").await.unwrap_err();
        assert!(err.is_mock_failure());
        assert!(api.call(Endpoint::Ocr).await.is_ok());
    }
}
