//! Error types for the report pipeline.
//!
//! A single failed call is described by [`AppError`]. How far that failure
//! travels depends on the stage: identity and period lookups wrap it in a
//! [`FatalError`] that aborts the run, while approval lookups wrap it in a
//! [`PeriodError`] that only degrades one row of the report.

use crate::models::Period;
use std::fmt;
use thiserror::Error;

/// Cause of a failed request or an invalid configuration value.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request could not be built.
    #[error("Invalid request: {message}")]
    Request { message: String },

    /// The service answered with something other than 200 OK.
    #[error("HTTP request to `{endpoint}` failed ({status_code}): {message}")]
    Api {
        message: String,
        status_code: u16,
        endpoint: String,
    },

    /// Transport failure, including timeouts.
    #[error("Network error{}: {message}", endpoint_suffix(.endpoint))]
    Network {
        message: String,
        endpoint: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("Failed to parse the document received from `{endpoint}`: {message}")]
    Parse { message: String, endpoint: String },

    /// Invalid configuration value.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },
}

impl AppError {
    /// Create a request construction error.
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    /// Create an API error with status code and endpoint.
    pub fn api(message: impl Into<String>, status_code: u16, endpoint: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            status_code,
            endpoint: endpoint.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            endpoint: None,
        }
    }

    /// Create a response parsing error.
    pub fn parse(message: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create an invalid input error with field name.
    pub fn invalid_input_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Attach the endpoint name to a network error.
    pub fn at_endpoint(self, name: impl Into<String>) -> Self {
        match self {
            Self::Network { message, .. } => Self::Network {
                message,
                endpoint: Some(name.into()),
            },
            other => other,
        }
    }

    /// HTTP status code, if the service answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Endpoint the failure came from, if known.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Api { endpoint, .. } | Self::Parse { endpoint, .. } => Some(endpoint),
            Self::Network { endpoint, .. } => endpoint.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network("Request timed out")
        } else if err.is_connect() {
            Self::network(format!("Failed to connect to server: {}", err))
        } else if err.is_builder() {
            Self::request(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

fn endpoint_suffix(endpoint: &Option<String>) -> String {
    endpoint
        .as_deref()
        .map(|e| format!(" (`{}`)", e))
        .unwrap_or_default()
}

/// Pipeline stage that may abort the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    IdentityResolution,
    PeriodEnumeration,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdentityResolution => f.write_str("identity resolution"),
            Self::PeriodEnumeration => f.write_str("period enumeration"),
        }
    }
}

/// Failure that stops the pipeline before any report is produced.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct FatalError {
    pub stage: Stage,
    #[source]
    pub source: AppError,
}

impl FatalError {
    pub fn new(stage: Stage, source: AppError) -> Self {
        Self { stage, source }
    }
}

/// Failure confined to a single period; the run continues without it.
#[derive(Debug, Error)]
#[error("period {} to {}: {source}", .period.from, .period.to)]
pub struct PeriodError {
    pub period: Period,
    #[source]
    pub source: AppError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = AppError::api("Unauthorized", 401, "Myself");
        assert_eq!(
            err.to_string(),
            "HTTP request to `Myself` failed (401): Unauthorized"
        );
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.endpoint(), Some("Myself"));
    }

    #[test]
    fn test_at_endpoint_only_touches_network_errors() {
        let err = AppError::network("Request timed out").at_endpoint("periods");
        assert_eq!(err.endpoint(), Some("periods"));
        assert_eq!(err.to_string(), "Network error (`periods`): Request timed out");

        let err = AppError::request("bad header").at_endpoint("periods");
        assert_eq!(err.endpoint(), None);
    }

    #[test]
    fn test_fatal_error_names_stage_and_cause() {
        let err = FatalError::new(
            Stage::PeriodEnumeration,
            AppError::api("Internal Server Error", 500, "periods"),
        );
        let text = err.to_string();
        assert!(text.starts_with("period enumeration failed:"));
        assert!(text.contains("`periods`"));
        assert!(text.contains("500"));
    }

    #[test]
    fn test_period_error_names_bounds() {
        let err = PeriodError {
            period: Period::new("2024-01-16", "2024-01-31"),
            source: AppError::network("Request timed out"),
        };
        assert_eq!(
            err.to_string(),
            "period 2024-01-16 to 2024-01-31: Network error: Request timed out"
        );
    }
}
