//! Error types for the onboarding library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::Status;

/// Comprehensive error type for all onboarding operations.
#[derive(Error, Debug)]
pub enum OnboardingError {
    /// A status change that would move a step backwards
    #[error("Invalid transition for '{id}': {from} -> {to}")]
    InvalidTransition { id: String, from: Status, to: Status },
    /// Every step of the flow is already completed
    #[error("Onboarding flow is already complete")]
    FlowComplete,
    /// A review decision was given while no step awaits one
    #[error("Step '{step}' is not awaiting approval")]
    NotAwaitingApproval { step: String },
    /// A timer fired for a step that is not automated or not running
    #[error("Step '{step}' has no automated work to advance")]
    NothingToAdvance { step: String },
    /// The flow definition cannot build a tracker
    #[error("Invalid flow: {reason}")]
    InvalidFlow { reason: String },
    /// Mock API path that maps to no canned response
    #[error("Unknown endpoint '{endpoint}'")]
    UnknownEndpoint { endpoint: String },
    /// Simulated backend call failure
    #[error("Mock call to '{endpoint}' failed")]
    MockCallFailed { endpoint: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Customer not found for the given ID
    #[error("Customer with ID {id} not found")]
    CustomerNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// The session driver has stopped and accepts no more commands
    #[error("Onboarding session is closed")]
    SessionClosed,
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> OnboardingError {
        OnboardingError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl OnboardingError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an invalid flow error with a reason.
    pub fn invalid_flow(reason: impl Into<String>) -> Self {
        Self::InvalidFlow {
            reason: reason.into(),
        }
    }

    /// Whether this error came from a simulated backend call.
    ///
    /// These are surfaced to the user as a generic notice rather than the
    /// error text itself.
    pub fn is_mock_failure(&self) -> bool {
        matches!(
            self,
            Self::MockCallFailed { .. } | Self::UnknownEndpoint { .. }
        )
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T> {
    /// Add context to any error type, converting to OnboardingError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| OnboardingError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

/// Result type alias for onboarding operations
pub type Result<T> = std::result::Result<T, OnboardingError>;
