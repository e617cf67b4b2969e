//! Failure classification for requests made against the HRMS API
//!
//! Every failed exchange is classified into one of four categories: an
//! application-level rejection (a response arrived with a non-2xx status), a
//! transport failure (no response arrived), a local failure (the request could
//! not be built or its response could not be decoded), or an unknown failure.
//! The normalized user-facing message is derived from this classification.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use super::normalize::normalize;

/// Reasons a request that was sent never received a response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportFailure {
    /// The request exceeded the transport deadline.
    Timeout,
    /// The network could not be reached (DNS, routing, TLS handshake).
    NetworkUnreachable,
    /// Any other failure to obtain a response, such as a refused connection.
    Other(String),
}

/// A classified request failure.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiFailure {
    /// A response arrived but indicates failure.
    Rejected {
        /// HTTP status code of the response.
        status: u16,
        /// Decoded response body, if any was sent.
        payload: Option<Value>,
    },
    /// The request was sent but no response arrived.
    Transport(TransportFailure),
    /// The request could not be constructed or its response could not be decoded.
    Local(String),
    /// Nothing is known about the failure.
    Unknown,
}

impl ApiFailure {
    /// Creates a rejection from a status code and decoded payload.
    pub fn rejected(status: u16, payload: Option<Value>) -> Self {
        Self::Rejected { status, payload }
    }

    /// Creates a timeout failure.
    pub fn timeout() -> Self {
        Self::Transport(TransportFailure::Timeout)
    }

    /// Creates a local failure with a plain description.
    pub fn local(description: impl Into<String>) -> Self {
        Self::Local(description.into())
    }

    /// Returns the HTTP status for rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if a response was received.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Returns true if no response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true if the request exceeded its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(TransportFailure::Timeout))
    }
}

/// A failed request together with its normalized message.
///
/// `Display` yields the normalized message, so the error can be shown to the
/// user as-is.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// The classified failure.
    pub failure: ApiFailure,
    /// Normalized, never-empty message.
    pub message: String,
    /// Request context (method, url) for diagnostics.
    pub context: HashMap<String, String>,
}

impl ApiError {
    /// Classifies and normalizes a failure.
    pub fn new(failure: ApiFailure) -> Self {
        let message = normalize(&failure);
        Self {
            failure,
            message,
            context: HashMap::new(),
        }
    }

    /// Adds a context key-value pair to the error.
    pub fn add_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Returns the normalized message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ApiFailure> for ApiError {
    fn from(failure: ApiFailure) -> Self {
        Self::new(failure)
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
