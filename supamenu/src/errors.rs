use std::collections::BTreeMap;
use thiserror::Error;

use crate::validation::{FieldErrors, StepId};

/// Failure below the HTTP layer: no status code was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Could not build request: {0}")]
    InvalidRequest(String),
}

/// Normalised outcome of a failed backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("You are not signed in")]
    MissingCredential,
    #[error("{message}")]
    Unauthorized { status: u16, message: String },
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        details: BTreeMap<String, String>,
    },
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Invalid response from server: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. }
            | ApiError::Rejected { status, .. }
            | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::MissingCredential | ApiError::Unauthorized { .. })
    }
}

/// Classified failure of a create-restaurant submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    /// Another submission is still awaiting its response.
    #[error("A submission is already in progress")]
    Busy,
    /// The backend rejected individual fields.
    #[error("{message}")]
    ValidationRejected { message: String, fields: FieldErrors },
    /// Missing or expired credential. The session must be torn down.
    #[error("{0}")]
    Unauthorized(String),
    /// Network or server fault. The draft is kept for a manual retry.
    #[error("{0}")]
    Transient(String),
}

impl From<ApiError> for SubmissionError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::MissingCredential => {
                SubmissionError::Unauthorized("Please sign in to continue".to_string())
            }
            ApiError::Unauthorized { message, .. } => SubmissionError::Unauthorized(message),
            ApiError::Rejected { message, details, .. } if !details.is_empty() => {
                SubmissionError::ValidationRejected { message, fields: details }
            }
            other => SubmissionError::Transient(other.to_string()),
        }
    }
}

/// Why the wizard refused or failed a submit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("A submission is already in progress")]
    Busy,
    #[error("Submit is only available on the last step (currently on {0})")]
    NotOnLastStep(StepId),
    #[error("This wizard has already finished")]
    Closed,
    #[error("Please correct the highlighted fields")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Base URL cannot be empty.")]
    EmptyBaseUrl,
    #[error("Base URL must start with http:// or https:// (got {0})")]
    UnsupportedScheme(String),
}
