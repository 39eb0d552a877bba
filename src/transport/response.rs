//! Responses returned by the transport.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{
    StatusCode,
    header::{HeaderMap, RETRY_AFTER},
};
use serde::de::DeserializeOwned;

use crate::{Error, ErrorKind, endpoints::Endpoint};

/// A fully buffered HTTP response.
///
/// Any status other than 500 reaches the caller as an `InvokeResponse`,
/// client and server errors included; use [`error_for_status`] to turn
/// non-success statuses into errors.
///
/// [`error_for_status`]: InvokeResponse::error_for_status
#[derive(Debug, Clone)]
pub struct InvokeResponse {
    endpoint: Endpoint,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl InvokeResponse {
    pub(crate) fn new(endpoint: Endpoint, status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            endpoint,
            status,
            headers,
            body,
        }
    }

    /// Returns the endpoint that produced this response.
    ///
    /// Diagnostic only: any endpoint of the set may serve any call.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as UTF-8 text, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserializes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::InvalidResponse`] error if the body does not
    /// match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(|e| {
            Error::invalid_response(format!("failed to parse response: {}", e)).with_source(e)
        })
    }

    /// Returns the response unchanged if its status is a success, or the
    /// matching error otherwise.
    pub fn error_for_status(self) -> Result<Self, Error> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(self.to_error())
        }
    }

    /// Maps a non-success response to an SDK error.
    pub fn to_error(&self) -> Error {
        map_status_error(self.status, &self.headers, &self.text())
    }
}

/// Maps HTTP status codes to SDK errors.
pub(crate) fn map_status_error(status: StatusCode, headers: &HeaderMap, body: &str) -> Error {
    let code = status.as_u16();
    let message = if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        json.get("message")
            .or_else(|| json.get("error"))
            .and_then(|m| m.as_str())
            .unwrap_or(body)
            .to_string()
    } else {
        body.to_string()
    };

    let kind = ErrorKind::from_http_status(code);
    let mut err = Error::new(kind, message).with_status(code);

    if kind == ErrorKind::RateLimited {
        if let Some(delay) = headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
        {
            err = err.with_retry_after(delay);
        }
    }

    err
}
