//! Internal client implementation.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::{
    Error,
    transport::{InvokeRequest, InvokeResponse, MultiplexedTransport},
};

/// Version prefix of every API resource.
pub(crate) const API_VERSION: &str = "v2.6";

pub(crate) struct ClientInner {
    /// Transport shared by every operation client.
    pub transport: MultiplexedTransport,
}

impl ClientInner {
    pub(crate) fn new(transport: MultiplexedTransport) -> Self {
        Self { transport }
    }

    /// Builds a versioned resource path.
    pub(crate) fn resource(path: &str) -> String {
        format!("{}/{}", API_VERSION, path.trim_start_matches('/'))
    }

    /// Attempt timeout for a call the API may hold open for `wait_time`.
    ///
    /// Must outlast the server-side wait: a timed out attempt fails over,
    /// which would resubmit the call to the next endpoint.
    pub(crate) fn held_call_timeout(&self, wait_time: Duration) -> Duration {
        self.transport.timeout().saturating_add(wait_time)
    }

    /// Executes a call, returning whatever status the API answered.
    pub(crate) async fn invoke(&self, request: InvokeRequest) -> Result<InvokeResponse, Error> {
        self.transport.invoke(request).await
    }

    /// Executes a call and parses a successful JSON response.
    pub(crate) async fn invoke_json<R>(&self, request: InvokeRequest) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        self.invoke(request).await?.error_for_status()?.json()
    }
}
