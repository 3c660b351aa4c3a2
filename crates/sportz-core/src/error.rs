//! Domain error types.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Machine-readable category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// The value is missing or has the wrong JSON type.
    InvalidType,
    /// The value is below its minimum (empty text, non-positive number).
    TooSmall,
    /// The value exceeds its maximum.
    TooBig,
    /// The value is not a parseable timestamp.
    InvalidDate,
    /// A cross-field rule was violated.
    Custom,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Category of the failure.
    pub code: IssueCode,
    /// Human-readable description.
    pub message: String,
    /// Path to the offending field; empty for the input as a whole.
    pub path: Vec<String>,
}

impl ValidationIssue {
    /// Creates an issue attributed to a top-level field.
    #[must_use]
    pub fn new(field: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: vec![field.to_owned()],
        }
    }

    /// Creates an issue about the input as a whole.
    #[must_use]
    pub fn root(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Returns the offending field name, if the issue is field-scoped.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Input failed validation; carries every issue found.
    #[error("validation error: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// A stored start/end pair cannot be ordered.
    #[error("invalid time window: {0}")]
    InvalidTimeWindow(String),

    /// No match exists with the given identifier.
    #[error("match not found: {0}")]
    MatchNotFound(i64),

    /// The store adapter failed.
    #[error("store error: {0}")]
    Store(String),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
