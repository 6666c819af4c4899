//! Diagnostic error types.

use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterMacro};

use crate::utils::sanitize_and_truncate_error_message;

/// Failure category assigned by the classifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Display, AsRefStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    /// Tor proxy or circuit failure
    Tor,
    /// Refused, reset or unreachable connection
    Network,
    /// Rejected credentials
    Auth,
    /// Request rejected before any network I/O
    Validation,
    /// Request or connect timed out
    Timeout,
    /// Host name resolution failed
    Dns,
    /// Failure status in a received response
    Http,
    /// Nothing matched
    Unknown,
}

/// A classified failure with remediation suggestions.
///
/// Keeps the original error as its [`source`](StdError::source).
#[derive(Debug, Serialize)]
pub struct DiagnosticError {
    /// Category
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    /// Human-readable message, including the original error text
    pub message: String,
    /// Original error, if the diagnosis came from one
    #[serde(skip)]
    pub cause: Option<anyhow::Error>,
    /// Ordered remediation suggestions
    pub suggestions: Vec<String>,
    /// Target URL of the failed request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTTP status, for diagnoses of received responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl DiagnosticError {
    /// Whether re-sending the same request may succeed.
    ///
    /// Timeout and network failures always qualify. Tor failures qualify
    /// only when the message points at a circuit or temporary problem
    /// rather than a proxy that is not running.
    pub fn is_retryable(&self) -> bool {
        match self.error_type {
            ErrorType::Timeout | ErrorType::Network => true,
            ErrorType::Tor => {
                let message = self.message.to_lowercase();
                message.contains("circuit") || message.contains("temporary")
            }
            _ => false,
        }
    }

    /// Multi-line report for display: type, message, URL, status and
    /// numbered suggestions.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Error Type: {}\nMessage: {}\n",
            self.error_type,
            sanitize_and_truncate_error_message(&self.message)
        );

        if let Some(url) = &self.url {
            summary.push_str(&format!("URL: {}\n", url));
        }
        if let Some(status) = self.status_code {
            summary.push_str(&format!("Status Code: {}\n", status));
        }
        if !self.suggestions.is_empty() {
            summary.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                summary.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        summary
    }
}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for DiagnosticError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| &**cause as &(dyn StdError + 'static))
    }
}
