//! Transport layer for Verifalia communication.
//!
//! - [`MultiplexedTransport`]: executes logical calls with failover across
//!   an [`EndpointSet`](crate::EndpointSet)
//! - [`InvokeRequest`] / [`InvokeResponse`]: one logical call and its answer
//! - [`ContentFactory`]: produces a fresh request body per physical attempt
//!
//! Most users interact with the higher-level [`Client`](crate::Client); the
//! transport is public for calls the typed operations do not cover.
//!
//! ```rust
//! use verifalia::transport::{InvokeRequest, JsonContent, Method};
//!
//! let request = InvokeRequest::new(Method::POST, "v2.6/email-validations")
//!     .with_content(JsonContent::new(serde_json::json!({
//!         "entries": [{ "inputData": "batman@gmail.com" }]
//!     })));
//! assert_eq!(request.method(), &Method::POST);
//! ```

mod content;
mod multiplexed;
mod request;
mod response;
mod stats;

pub use content::{
    BytesContent, ContentFactory, ContentFuture, FnContent, JsonContent, RequestContent,
};
pub use multiplexed::{
    MultiplexedTransport, MultiplexedTransportBuilder, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT,
};
pub use request::InvokeRequest;
pub use response::InvokeResponse;
pub use reqwest::{Method, StatusCode};
pub use stats::TransportStats;
