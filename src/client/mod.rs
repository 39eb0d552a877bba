//! Client types for connecting to Verifalia.
//!
//! - [`Client`]: Top-level client, owns the transport and the credentials
//! - [`EmailValidationsClient`](crate::EmailValidationsClient): email
//!   validation jobs
//! - [`CreditsClient`](crate::CreditsClient): credit balance and usage
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use verifalia::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let client = Client::builder()
//!     .credentials(UsernamePasswordConfig::new("samantha", "42"))
//!     .build()?;
//!
//! let validation = client
//!     .email_validations()
//!     .submit(ValidationRequest::new(["batman@gmail.com"]), WaitOptions::default())
//!     .await?;
//! println!("{:?}", validation.entries[0].classification);
//! # Ok(())
//! # }
//! ```

mod builder;
pub(crate) mod inner;

pub use builder::{ClientBuilder, HasCredentials, NoCredentials};

use std::sync::Arc;

use crate::{
    credits::CreditsClient,
    endpoints::EndpointSet,
    transport::{MultiplexedTransport, TransportStats},
    validations::EmailValidationsClient,
};

/// The Verifalia SDK client.
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe. Clones share one connection pool and
/// can be used from any number of concurrent tasks.
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder<NoCredentials> {
        ClientBuilder::new()
    }

    /// Returns the email validations client.
    pub fn email_validations(&self) -> EmailValidationsClient {
        EmailValidationsClient::new(self.clone())
    }

    /// Returns the credits client.
    pub fn credits(&self) -> CreditsClient {
        CreditsClient::new(self.clone())
    }

    /// Returns the endpoints, in failover order.
    pub fn endpoints(&self) -> &EndpointSet {
        self.inner.transport.endpoints()
    }

    /// Returns the underlying transport, for calls not covered by the typed
    /// operations.
    pub fn transport(&self) -> &MultiplexedTransport {
        &self.inner.transport
    }

    /// Returns a snapshot of the transport counters.
    pub fn stats(&self) -> TransportStats {
        self.inner.transport.stats()
    }

    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub(crate) fn inner(&self) -> &inner::ClientInner {
        &self.inner
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoints", self.endpoints())
            .finish_non_exhaustive()
    }
}
