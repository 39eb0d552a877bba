//! Logical request descriptor.

use std::{fmt, sync::Arc, time::Duration};

use reqwest::{
    Method,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use tokio_util::sync::CancellationToken;

use super::content::ContentFactory;
use crate::Error;

/// One logical API call, independent of the endpoint that will serve it.
///
/// The descriptor is never mutated by the transport: each physical attempt
/// builds its own request from it.
///
/// ## Example
///
/// ```rust
/// use verifalia::transport::{InvokeRequest, JsonContent, Method};
///
/// let request = InvokeRequest::new(Method::POST, "v2.6/email-validations")
///     .with_query("waitTime", "30000")
///     .with_content(JsonContent::new(serde_json::json!({
///         "entries": [{ "inputData": "batman@gmail.com" }]
///     })));
/// assert_eq!(request.resource(), "v2.6/email-validations");
/// ```
#[derive(Clone)]
pub struct InvokeRequest {
    method: Method,
    resource: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    content: Option<Arc<dyn ContentFactory>>,
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl InvokeRequest {
    /// Creates a request for `resource`, relative to the endpoint base URI.
    pub fn new(method: Method, resource: impl Into<String>) -> Self {
        Self {
            method,
            resource: resource.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            content: None,
            timeout: None,
            cancellation: None,
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(resource: impl Into<String>) -> Self {
        Self::new(Method::GET, resource)
    }

    /// Shorthand for a `POST` request.
    pub fn post(resource: impl Into<String>) -> Self {
        Self::new(Method::POST, resource)
    }

    /// Shorthand for a `DELETE` request.
    pub fn delete(resource: impl Into<String>) -> Self {
        Self::new(Method::DELETE, resource)
    }

    /// Appends a query parameter. Order is preserved.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends a query parameter when `value` is present.
    #[must_use]
    pub fn with_optional_query(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with_query(key, value),
            None => self,
        }
    }

    /// Overrides a header for this request.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or value is not a valid HTTP header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, Error> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::invalid_argument(format!("invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::invalid_argument(format!("invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets the content factory invoked before each physical attempt.
    #[must_use]
    pub fn with_content(mut self, factory: impl ContentFactory + 'static) -> Self {
        self.content = Some(Arc::new(factory));
        self
    }

    /// Overrides the client timeout for each physical attempt of this request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the token that cancels the whole call, failover included.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Sets the cancellation token when one is given.
    #[must_use]
    pub fn with_optional_cancellation(mut self, token: Option<CancellationToken>) -> Self {
        if let Some(token) = token {
            self.cancellation = Some(token);
        }
        self
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the resource path.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns the query parameters, in insertion order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the header overrides.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn content(&self) -> Option<&Arc<dyn ContentFactory>> {
        self.content.as_ref()
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the cancellation token, if any.
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }
}

impl fmt::Debug for InvokeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvokeRequest")
            .field("method", &self.method)
            .field("resource", &self.resource)
            .field("query", &self.query)
            .field("has_content", &self.content.is_some())
            .finish_non_exhaustive()
    }
}
