//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::config::UNKNOWN_STATUS_TEXT;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Terminal failure of one family's lookup request.
///
/// A failure is scoped to the family whose request produced it and never
/// affects other in-flight families. The `Display` form is what ends up in
/// the [`ErrorRecord`](crate::models::ErrorRecord) shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointFailure {
    /// The server answered with a non-2xx status.
    #[error("{status}: {status_text}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Status text of the response, or `"unknown error"` when absent.
        status_text: String,
    },

    /// No HTTP response at all (connection refused, timeout, DNS failure).
    #[error("request error: {reason}")]
    Transport {
        /// Transport-level failure description from the HTTP client.
        reason: String,
    },

    /// A 2xx response whose body did not parse as an address record.
    #[error("{status}: malformed response body")]
    Decode {
        /// HTTP status code of the unusable response.
        status: u16,
    },
}

impl EndpointFailure {
    /// Builds a status failure, substituting `"unknown error"` when the
    /// response carries no status text.
    pub fn from_status(status: u16, status_text: Option<&str>) -> Self {
        let status_text = match status_text {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => UNKNOWN_STATUS_TEXT.to_string(),
        };
        EndpointFailure::Status {
            status,
            status_text,
        }
    }
}
