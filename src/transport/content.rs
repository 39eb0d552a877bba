//! Request bodies, produced afresh for every physical attempt.
//!
//! A body handed to the HTTP client is consumed by the attempt that sends it,
//! so a failover needs a new one. The transport asks a [`ContentFactory`] for
//! new content right before each attempt.

use std::{fmt, future::Future, pin::Pin};

use bytes::Bytes;
use serde::Serialize;

use crate::Error;

/// A type alias for the boxed future returned by content factories.
pub type ContentFuture<'a> = Pin<Box<dyn Future<Output = Result<RequestContent, Error>> + Send + 'a>>;

/// The body of one physical request.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestContent {
    content_type: Option<String>,
    body: Bytes,
}

impl RequestContent {
    /// Creates content with an explicit media type.
    pub fn new(content_type: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            body: body.into(),
        }
    }

    /// Serializes `value` as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        let body = serde_json::to_vec(value).map_err(|e| {
            Error::invalid_argument(format!("failed to serialize request body: {}", e))
        })?;
        Ok(Self::new("application/json", body))
    }

    /// Returns the media type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Bytes) {
        (self.content_type, self.body)
    }
}

impl fmt::Debug for RequestContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContent")
            .field("content_type", &self.content_type)
            .field("len", &self.body.len())
            .finish()
    }
}

/// Produces request content on demand.
///
/// Invoked exactly once per physical attempt, so it must be safe to call
/// several times within the same logical call.
pub trait ContentFactory: Send + Sync {
    /// Returns fresh content for the next attempt.
    fn create(&self) -> ContentFuture<'_>;
}

/// Serializes a value to JSON on every attempt.
#[derive(Debug, Clone)]
pub struct JsonContent<T> {
    value: T,
}

impl<T> JsonContent<T>
where
    T: Serialize + Send + Sync,
{
    /// Wraps the value to serialize.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T> ContentFactory for JsonContent<T>
where
    T: Serialize + Send + Sync,
{
    fn create(&self) -> ContentFuture<'_> {
        Box::pin(async move { RequestContent::json(&self.value) })
    }
}

/// Replays the same buffered content on every attempt.
#[derive(Debug, Clone)]
pub struct BytesContent {
    content: RequestContent,
}

impl BytesContent {
    /// Creates a factory replaying `content`.
    pub fn new(content: RequestContent) -> Self {
        Self { content }
    }
}

impl ContentFactory for BytesContent {
    fn create(&self) -> ContentFuture<'_> {
        let content = self.content.clone();
        Box::pin(async move { Ok(content) })
    }
}

/// Adapts a synchronous closure into a [`ContentFactory`].
///
/// ```rust
/// use verifalia::transport::{FnContent, RequestContent};
///
/// let factory = FnContent::new(|| Ok(RequestContent::new("text/plain", "hello")));
/// ```
pub struct FnContent<F> {
    produce: F,
}

impl<F> FnContent<F>
where
    F: Fn() -> Result<RequestContent, Error> + Send + Sync,
{
    /// Wraps the closure.
    pub fn new(produce: F) -> Self {
        Self { produce }
    }
}

impl<F> fmt::Debug for FnContent<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnContent").finish_non_exhaustive()
    }
}

impl<F> ContentFactory for FnContent<F>
where
    F: Fn() -> Result<RequestContent, Error> + Send + Sync,
{
    fn create(&self) -> ContentFuture<'_> {
        let content = (self.produce)();
        Box::pin(async move { content })
    }
}
