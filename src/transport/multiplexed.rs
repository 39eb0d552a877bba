//! Multiplexed REST transport with failover across equivalent endpoints.
//!
//! Every logical call makes exactly one ordered pass over the endpoint set,
//! starting from the first endpoint:
//!
//! - any response other than HTTP 500 is returned as-is, 4xx and other 5xx
//!   included;
//! - HTTP 500 and transport failures (connect, DNS, TLS, timeouts) are
//!   recorded and the next endpoint is tried;
//! - cancellation aborts the call at once;
//! - once the pass is exhausted, the call fails with
//!   [`ErrorKind::ServiceUnreachable`](crate::ErrorKind::ServiceUnreachable),
//!   carrying one [`AttemptError`] per endpoint.

use std::{error::Error as StdError, sync::Arc, time::Duration};

use reqwest::{
    StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};

use super::{
    request::InvokeRequest,
    response::InvokeResponse,
    stats::{StatsRecorder, TransportStats},
};
use crate::{
    Error,
    auth::{Authenticator, NoopAuthenticator},
    config::{PoolConfig, TlsConfig},
    endpoints::{Endpoint, EndpointSet},
    error::AttemptError,
    user_agent,
};

/// Default timeout of a single physical attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Multiplexed Transport
// ============================================================================

/// REST transport failing over across an [`EndpointSet`].
///
/// Cloning is cheap: clones share the HTTP connection pool, the
/// authenticator and the counters. Calls hold no shared mutable state, so a
/// transport may serve any number of concurrent calls.
///
/// ## Example
///
/// ```rust,no_run
/// use verifalia::transport::{InvokeRequest, MultiplexedTransport};
/// use verifalia::{EndpointSet, auth::BasicAuthenticator};
///
/// # async fn example() -> Result<(), verifalia::Error> {
/// let transport = MultiplexedTransport::builder()
///     .endpoints(EndpointSet::default_endpoints())
///     .authenticator(BasicAuthenticator::new("samantha", "42"))
///     .build()?;
///
/// let response = transport
///     .invoke(InvokeRequest::get("v2.6/credits/balance"))
///     .await?;
/// println!("{}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MultiplexedTransport {
    client: reqwest::Client,
    endpoints: EndpointSet,
    authenticator: Arc<dyn Authenticator>,
    timeout: Duration,
    stats: StatsRecorder,
}

impl std::fmt::Debug for MultiplexedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiplexedTransport")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

/// Outcome of one physical attempt that did not abort the call.
enum Attempt {
    Completed(InvokeResponse),
    Failed(AttemptError),
}

impl MultiplexedTransport {
    /// Creates a new transport builder.
    pub fn builder() -> MultiplexedTransportBuilder {
        MultiplexedTransportBuilder::new()
    }

    /// Returns the endpoints, in failover order.
    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    /// Returns the default timeout of each physical attempt.
    ///
    /// [`InvokeRequest::with_timeout`] overrides it for a single call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns a snapshot of the transport counters.
    pub fn stats(&self) -> TransportStats {
        self.stats.snapshot()
    }

    /// Executes one logical call, failing over across the endpoint set.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Cancelled`](crate::ErrorKind::Cancelled) if the
    ///   request's cancellation token fires, whichever attempt is running.
    /// - [`ErrorKind::ServiceUnreachable`](crate::ErrorKind::ServiceUnreachable)
    ///   if every endpoint answered 500 or failed at the transport level.
    /// - Any error raised by the authenticator or the content factory,
    ///   unchanged and without trying further endpoints.
    pub async fn invoke(&self, request: InvokeRequest) -> Result<InvokeResponse, Error> {
        self.stats.call_started();

        let cancellation = request.cancellation().cloned().unwrap_or_default();
        let mut failures = Vec::with_capacity(self.endpoints.len());

        for endpoint in &self.endpoints {
            let attempt = tokio::select! {
                biased;
                () = cancellation.cancelled() => {
                    self.stats.cancelled();
                    tracing::debug!(endpoint = %endpoint, "call cancelled");
                    return Err(Error::cancelled());
                }
                attempt = self.attempt(endpoint, &request) => attempt?,
            };

            match attempt {
                Attempt::Completed(response) => return Ok(response),
                Attempt::Failed(failure) => {
                    tracing::warn!(
                        endpoint = %endpoint,
                        reason = failure.reason(),
                        "endpoint failed, trying the next one"
                    );
                    self.stats.failover();
                    failures.push(failure);
                }
            }
        }

        self.stats.unreachable();
        tracing::error!(
            method = %request.method(),
            resource = request.resource(),
            attempts = failures.len(),
            "all the endpoints are unreachable"
        );
        Err(Error::service_unreachable(failures))
    }

    /// Sends one physical request to `endpoint`.
    ///
    /// `Err` aborts the whole call; `Attempt::Failed` moves it on.
    async fn attempt(&self, endpoint: &Endpoint, request: &InvokeRequest) -> Result<Attempt, Error> {
        let mut url = endpoint.resolve(request.resource())?;
        if !request.query().is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in request.query() {
                pairs.append_pair(key, value);
            }
        }

        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .headers(request.headers().clone());

        if let Some(timeout) = request.timeout() {
            builder = builder.timeout(timeout);
        }

        if let Some(factory) = request.content() {
            let (content_type, body) = factory.create().await?.into_parts();
            if let Some(content_type) = content_type {
                let value = HeaderValue::from_str(&content_type).map_err(|e| {
                    Error::invalid_argument(format!("invalid content type: {}", e))
                })?;
                builder = builder.header(CONTENT_TYPE, value);
            }
            builder = builder.body(body);
        }

        let builder = self.authenticator.authenticate(builder).await?;

        tracing::debug!(
            endpoint = %endpoint,
            method = %request.method(),
            resource = request.resource(),
            "sending request"
        );
        self.stats.attempt_sent();

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_builder() => {
                return Err(Error::invalid_argument(format!("invalid request: {}", e)).with_source(e));
            }
            Err(e) => {
                return Ok(Attempt::Failed(AttemptError::transport(
                    endpoint.clone(),
                    describe_transport_error(&e),
                )));
            }
        };

        let status = response.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            return Ok(Attempt::Failed(AttemptError::status(
                endpoint.clone(),
                status.as_u16(),
                format!("HTTP {}", status),
            )));
        }

        let headers = response.headers().clone();
        match response.bytes().await {
            Ok(body) => {
                tracing::debug!(endpoint = %endpoint, status = status.as_u16(), "response received");
                Ok(Attempt::Completed(InvokeResponse::new(
                    endpoint.clone(),
                    status,
                    headers,
                    body,
                )))
            }
            Err(e) => Ok(Attempt::Failed(AttemptError::transport(
                endpoint.clone(),
                describe_transport_error(&e),
            ))),
        }
    }
}

/// Renders a reqwest error along with its source chain.
fn describe_transport_error(e: &reqwest::Error) -> String {
    let mut description = if e.is_timeout() {
        String::from("request timed out")
    } else if e.is_connect() {
        String::from("connection failed")
    } else {
        String::from("HTTP error")
    };

    let mut source: Option<&dyn StdError> = Some(e);
    while let Some(err) = source {
        description.push_str(": ");
        description.push_str(&err.to_string());
        source = err.source();
    }
    description
}

// ============================================================================
// Multiplexed Transport Builder
// ============================================================================

/// Builder for [`MultiplexedTransport`].
pub struct MultiplexedTransportBuilder {
    endpoints: Option<EndpointSet>,
    authenticator: Arc<dyn Authenticator>,
    tls_config: TlsConfig,
    pool_config: PoolConfig,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: Option<String>,
    client_identity: Option<Arc<[u8]>>,
    allow_insecure: bool,
}

impl MultiplexedTransportBuilder {
    fn new() -> Self {
        Self {
            endpoints: None,
            authenticator: Arc::new(NoopAuthenticator),
            tls_config: TlsConfig::default(),
            pool_config: PoolConfig::default(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: None,
            client_identity: None,
            allow_insecure: false,
        }
    }

    /// Sets the endpoints. Defaults to [`EndpointSet::default_endpoints`].
    #[must_use]
    pub fn endpoints(mut self, endpoints: EndpointSet) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Sets the authenticator applied to every physical attempt.
    #[must_use]
    pub fn authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Arc::new(authenticator);
        self
    }

    /// Sets a shared authenticator.
    #[must_use]
    pub fn shared_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    /// Sets the TLS configuration.
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Sets the connection pool configuration.
    #[must_use]
    pub fn pool_config(mut self, config: PoolConfig) -> Self {
        self.pool_config = config;
        self
    }

    /// Sets the timeout of each physical attempt.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Overrides the User-Agent header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the PEM identity presented during the TLS handshake.
    #[must_use]
    pub fn client_identity_pem(mut self, pem: Arc<[u8]>) -> Self {
        self.client_identity = Some(pem);
        self
    }

    /// Allows plain `http://` endpoints.
    #[must_use]
    pub fn allow_insecure(mut self, allow: bool) -> Self {
        self.allow_insecure = allow;
        self
    }

    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an endpoint is not `https` while
    /// insecure endpoints are not allowed, or if the TLS setup is invalid.
    pub fn build(self) -> Result<MultiplexedTransport, Error> {
        let endpoints = self.endpoints.unwrap_or_default();

        if !self.allow_insecure && !endpoints.all_https() {
            return Err(Error::configuration(
                "endpoints must use https unless insecure connections are allowed",
            ));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| user_agent::user_agent().to_string());

        let client_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .pool_max_idle_per_host(self.pool_config.max_idle_per_host)
            .pool_idle_timeout(self.pool_config.idle_timeout)
            .tcp_keepalive(self.pool_config.tcp_keepalive)
            .user_agent(user_agent)
            .default_headers(default_headers);

        let client_builder =
            apply_tls(client_builder, &self.tls_config, self.client_identity.as_deref())?;

        let client = client_builder.build().map_err(|e| {
            Error::configuration(format!("failed to create HTTP client: {}", e)).with_source(e)
        })?;

        Ok(MultiplexedTransport {
            client,
            endpoints,
            authenticator: self.authenticator,
            timeout: self.timeout,
            stats: StatsRecorder::default(),
        })
    }
}

impl std::fmt::Debug for MultiplexedTransportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiplexedTransportBuilder")
            .field("endpoints", &self.endpoints)
            .field("timeout", &self.timeout)
            .field("allow_insecure", &self.allow_insecure)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TLS
// ============================================================================

#[cfg(any(feature = "rustls", feature = "native-tls"))]
fn apply_tls(
    mut builder: reqwest::ClientBuilder,
    tls: &TlsConfig,
    identity: Option<&[u8]>,
) -> Result<reqwest::ClientBuilder, Error> {
    if tls.skip_verification {
        builder = builder.danger_accept_invalid_certs(true);
    }

    if let Some(ref ca_cert_file) = tls.ca_cert_file {
        let cert_pem = std::fs::read(ca_cert_file).map_err(|e| {
            Error::configuration(format!("failed to read certificate {:?}: {}", ca_cert_file, e))
        })?;
        for cert in load_root_certificates(&cert_pem, &format!("{:?}", ca_cert_file))? {
            builder = builder.add_root_certificate(cert);
        }
    }

    if let Some(ref ca_cert_pem) = tls.ca_cert_pem {
        for cert in load_root_certificates(ca_cert_pem.as_bytes(), "CA certificate PEM")? {
            builder = builder.add_root_certificate(cert);
        }
    }

    if let Some(pem) = identity {
        builder = builder.identity(load_identity(pem)?);
    }

    Ok(builder)
}

/// Parses a PEM bundle holding at least one certificate.
#[cfg(any(feature = "rustls", feature = "native-tls"))]
fn load_root_certificates(pem: &[u8], origin: &str) -> Result<Vec<reqwest::Certificate>, Error> {
    let certs = reqwest::Certificate::from_pem_bundle(pem)
        .map_err(|e| Error::configuration(format!("invalid certificate {}: {}", origin, e)))?;
    if certs.is_empty() {
        return Err(Error::configuration(format!(
            "no certificate found in {}",
            origin
        )));
    }
    Ok(certs)
}

#[cfg(not(any(feature = "rustls", feature = "native-tls")))]
fn apply_tls(
    builder: reqwest::ClientBuilder,
    tls: &TlsConfig,
    identity: Option<&[u8]>,
) -> Result<reqwest::ClientBuilder, Error> {
    if tls.skip_verification || tls.has_custom_ca() || identity.is_some() {
        return Err(Error::configuration(
            "TLS settings require the `rustls` or `native-tls` feature",
        ));
    }
    Ok(builder)
}

#[cfg(feature = "rustls")]
fn load_identity(pem: &[u8]) -> Result<reqwest::Identity, Error> {
    reqwest::Identity::from_pem(pem)
        .map_err(|e| Error::configuration(format!("invalid client certificate: {}", e)))
}

#[cfg(all(feature = "native-tls", not(feature = "rustls")))]
fn load_identity(pem: &[u8]) -> Result<reqwest::Identity, Error> {
    reqwest::Identity::from_pkcs8_pem(pem, pem)
        .map_err(|e| Error::configuration(format!("invalid client certificate: {}", e)))
}

// ============================================================================
// Tests
// ============================================================================
