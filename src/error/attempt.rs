//! Per-endpoint failure records.

use std::fmt;

use crate::endpoints::Endpoint;

/// A failed physical attempt against one endpoint.
///
/// Attempt errors are only collected for diagnostics: they are exposed through
/// [`Error::attempts()`](crate::Error::attempts) when every endpoint of a call
/// has failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptError {
    endpoint: Endpoint,
    reason: String,
    status: Option<u16>,
}

impl AttemptError {
    /// Records a transport-level failure (connection, timeout, TLS, ...).
    pub fn transport(endpoint: Endpoint, reason: impl Into<String>) -> Self {
        Self {
            endpoint,
            reason: reason.into(),
            status: None,
        }
    }

    /// Records a failure derived from an HTTP status code.
    pub fn status(endpoint: Endpoint, status: u16, reason: impl Into<String>) -> Self {
        Self {
            endpoint,
            reason: reason.into(),
            status: Some(status),
        }
    }

    /// Returns the endpoint that was attempted.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the human-readable failure reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns the HTTP status code, if the endpoint answered at all.
    pub fn status_code(&self) -> Option<u16> {
        self.status
    }
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.endpoint, self.reason)
    }
}
