//! Client builder with typestate pattern.

use std::{marker::PhantomData, time::Duration};

use super::inner::ClientInner;
use crate::{
    Client, Error,
    auth::Credentials,
    config::{PoolConfig, TlsConfig},
    endpoints::EndpointSet,
    transport::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, MultiplexedTransport},
};

/// Marker type: Credentials not yet provided.
pub struct NoCredentials;

/// Marker type: Credentials have been provided.
pub struct HasCredentials;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern to ensure credentials are provided at compile
/// time.
///
/// ## Required Configuration
///
/// - `credentials()`: Authentication credentials
///
/// ## Optional Configuration
///
/// - `endpoints()`: Endpoints to fail over across; defaults depend on the
///   credentials
/// - `tls_config()`: Custom TLS settings
/// - `pool_config()`: Connection pool settings
/// - `timeout()` / `connect_timeout()`: Per-attempt timeouts
/// - `user_agent()`: User-Agent override
///
/// ## Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use verifalia::{Client, UsernamePasswordConfig};
///
/// let client = Client::builder()
///     .credentials(UsernamePasswordConfig::new("samantha", "42"))
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok::<(), verifalia::Error>(())
/// ```
pub struct ClientBuilder<CredentialsState> {
    credentials: Option<Credentials>,
    endpoints: Option<EndpointSet>,
    tls_config: TlsConfig,
    pool_config: PoolConfig,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: Option<String>,
    _credentials_state: PhantomData<CredentialsState>,
}

impl ClientBuilder<NoCredentials> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            credentials: None,
            endpoints: None,
            tls_config: TlsConfig::default(),
            pool_config: PoolConfig::default(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: None,
            _credentials_state: PhantomData,
        }
    }

    /// Sets the authentication credentials.
    ///
    /// Accepts any type that can be converted into [`Credentials`]:
    /// - [`UsernamePasswordConfig`](crate::UsernamePasswordConfig)
    /// - [`BearerCredentialsConfig`](crate::BearerCredentialsConfig)
    /// - [`ClientCertificateConfig`](crate::ClientCertificateConfig)
    pub fn credentials(self, credentials: impl Into<Credentials>) -> ClientBuilder<HasCredentials> {
        ClientBuilder {
            credentials: Some(credentials.into()),
            endpoints: self.endpoints,
            tls_config: self.tls_config,
            pool_config: self.pool_config,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            user_agent: self.user_agent,
            _credentials_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoCredentials> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ClientBuilder<C> {
    /// Sets the endpoints, in failover order.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let builder = builder.endpoints(EndpointSet::parse([
    ///     "https://api-2.verifalia.com",
    ///     "https://api-1.verifalia.com",
    /// ])?);
    /// ```
    #[must_use]
    pub fn endpoints(mut self, endpoints: EndpointSet) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Sets the TLS configuration.
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Disables TLS certificate verification and allows `http://` endpoints.
    ///
    /// **WARNING**: Only use this against local mock servers.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.tls_config.skip_verification = true;
        self
    }

    /// Sets the connection pool configuration.
    #[must_use]
    pub fn pool_config(mut self, config: PoolConfig) -> Self {
        self.pool_config = config;
        self
    }

    /// Sets the timeout of each physical attempt.
    ///
    /// A call failing over across three endpoints may take up to three
    /// times this value.
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
}

impl ClientBuilder<HasCredentials> {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an endpoint is not `https` and
    /// [`insecure`](Self::insecure) was not called, or if the TLS settings
    /// or the client certificate are invalid.
    pub fn build(self) -> Result<Client, Error> {
        let credentials = self
            .credentials
            .ok_or_else(|| Error::configuration("credentials are required"))?;

        let endpoints = self
            .endpoints
            .unwrap_or_else(|| credentials.default_endpoints());

        let mut transport = MultiplexedTransport::builder()
            .endpoints(endpoints)
            .shared_authenticator(credentials.authenticator())
            .allow_insecure(self.tls_config.skip_verification)
            .tls_config(self.tls_config)
            .pool_config(self.pool_config)
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout);

        if let Some(certificate) = credentials.as_client_certificate() {
            transport = transport.client_identity_pem(certificate.pem().into());
        }
        if let Some(user_agent) = self.user_agent {
            transport = transport.user_agent(user_agent);
        }

        let transport = transport.build()?;
        tracing::debug!(endpoints = transport.endpoints().len(), "client created");

        Ok(Client::from_inner(ClientInner::new(transport)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{BearerCredentialsConfig, ClientCertificateConfig, ErrorKind, UsernamePasswordConfig};

    #[test]
    fn test_builder_typestate() {
        // `build` is only available once credentials are set.
        let _builder = ClientBuilder::new().credentials(BearerCredentialsConfig::new("token"));
    }

    #[test]
    fn test_build_uses_default_endpoints() {
        let client = ClientBuilder::new()
            .credentials(UsernamePasswordConfig::new("samantha", "42"))
            .build()
            .unwrap();
        assert_eq!(client.endpoints(), &EndpointSet::default_endpoints());
    }

    #[test]
    fn test_build_with_custom_endpoints() {
        let endpoints = EndpointSet::parse(["https://api-3.verifalia.com"]).unwrap();
        let client = ClientBuilder::new()
            .endpoints(endpoints.clone())
            .credentials(BearerCredentialsConfig::new("token"))
            .build()
            .unwrap();
        assert_eq!(client.endpoints(), &endpoints);
    }

    #[test]
    fn test_build_requires_https() {
        let err = ClientBuilder::new()
            .credentials(BearerCredentialsConfig::new("token"))
            .endpoints(EndpointSet::parse(["http://localhost:8080"]).unwrap())
            .build()
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("https"));
    }

    #[test]
    fn test_build_allows_http_when_insecure() {
        let result = ClientBuilder::new()
            .credentials(BearerCredentialsConfig::new("token"))
            .endpoints(EndpointSet::parse(["http://localhost:8080"]).unwrap())
            .insecure()
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn test_client_certificate_rejects_invalid_pem() {
        let err = ClientBuilder::new()
            .credentials(ClientCertificateConfig::from_pem(b"not a pem".to_vec()))
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_optional_configs() {
        let builder = ClientBuilder::new()
            .credentials(BearerCredentialsConfig::new("token"))
            .pool_config(PoolConfig::new().with_max_idle_per_host(2))
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("my-app/1.0");

        assert_eq!(builder.timeout, Duration::from_secs(60));
        assert_eq!(builder.connect_timeout, Duration::from_secs(5));
        assert_eq!(builder.pool_config.max_idle_per_host, 2);
        assert_eq!(builder.user_agent.as_deref(), Some("my-app/1.0"));
    }

    #[test]
    fn test_builder_default() {
        let builder = ClientBuilder::default();
        assert!(builder.credentials.is_none());
        assert!(builder.endpoints.is_none());
        assert_eq!(builder.timeout, DEFAULT_TIMEOUT);
    }
}
