//! Credentials types for Verifalia authentication.

use std::{fmt, path::Path, sync::Arc};

use super::{
    Authenticator, BasicAuthenticator, BearerAuthenticator, NoopAuthenticator,
    StaticTokenProvider, TokenProvider,
};
use crate::{EndpointSet, Error};

/// Username and password credentials.
///
/// Works for Verifalia users, sub-accounts and browser app keys.
///
/// ## Example
///
/// ```rust,ignore
/// use verifalia::{Client, UsernamePasswordConfig};
///
/// let client = Client::builder()
///     .credentials(UsernamePasswordConfig::new("samantha", "42"))
///     .build()?;
/// ```
#[derive(Clone)]
pub struct UsernamePasswordConfig {
    /// The username (or app key id).
    pub username: String,

    password: Arc<str>,
}

impl UsernamePasswordConfig {
    /// Creates a new username/password configuration.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Arc::from(password.into()),
        }
    }

    /// Returns the password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for UsernamePasswordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsernamePasswordConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Bearer token credentials.
///
/// Either a pre-acquired token or a custom [`TokenProvider`] handling the
/// token lifecycle.
///
/// ```rust
/// use verifalia::BearerCredentialsConfig;
///
/// let config = BearerCredentialsConfig::new("eyJhbGciOiJIUzI1NiIs...");
/// ```
#[derive(Clone)]
pub struct BearerCredentialsConfig {
    provider: Arc<dyn TokenProvider>,
}

impl BearerCredentialsConfig {
    /// Creates bearer credentials from a static token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            provider: Arc::new(StaticTokenProvider::new(token)),
        }
    }

    /// Creates bearer credentials backed by a custom token provider.
    pub fn from_provider(provider: Arc<dyn TokenProvider>) -> Self {
        Self { provider }
    }

    /// Returns the token provider.
    pub fn provider(&self) -> &Arc<dyn TokenProvider> {
        &self.provider
    }
}

impl fmt::Debug for BearerCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerCredentialsConfig")
            .field("provider", &"[REDACTED]")
            .finish()
    }
}

impl<S: Into<String>> From<S> for BearerCredentialsConfig {
    fn from(token: S) -> Self {
        Self::new(token)
    }
}

/// Client certificate (mutual TLS) credentials.
///
/// Holds a PEM bundle with the certificate chain and its private key. These
/// credentials are only accepted by the client-certificate endpoints, which
/// the client selects automatically unless endpoints are set explicitly.
#[derive(Clone)]
pub struct ClientCertificateConfig {
    pem: Arc<[u8]>,
}

impl ClientCertificateConfig {
    /// Creates client certificate credentials from PEM data.
    pub fn from_pem(pem: impl Into<Vec<u8>>) -> Self {
        let pem: Vec<u8> = pem.into();
        Self {
            pem: Arc::from(pem),
        }
    }

    /// Reads client certificate credentials from a PEM file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let pem = std::fs::read(path).map_err(|e| {
            Error::configuration(format!("failed to read certificate {:?}: {}", path, e))
        })?;
        Ok(Self::from_pem(pem))
    }

    /// Returns the PEM data.
    pub fn pem(&self) -> &[u8] {
        &self.pem
    }
}

impl fmt::Debug for ClientCertificateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCertificateConfig")
            .field("pem", &"[REDACTED]")
            .finish()
    }
}

/// Authentication credentials for the Verifalia SDK.
///
/// ```rust
/// use verifalia::{BearerCredentialsConfig, Credentials, UsernamePasswordConfig};
///
/// let creds: Credentials = UsernamePasswordConfig::new("samantha", "42").into();
/// assert!(creds.is_username_password());
///
/// let creds: Credentials = BearerCredentialsConfig::new("token").into();
/// assert!(creds.is_bearer());
/// ```
#[derive(Clone)]
pub enum Credentials {
    /// HTTP basic authentication.
    UsernamePassword(UsernamePasswordConfig),

    /// Bearer token authentication.
    Bearer(BearerCredentialsConfig),

    /// Client certificate authentication.
    ClientCertificate(ClientCertificateConfig),
}

impl Credentials {
    /// Returns `true` if this is username/password authentication.
    pub fn is_username_password(&self) -> bool {
        matches!(self, Credentials::UsernamePassword(_))
    }

    /// Returns `true` if this is bearer token authentication.
    pub fn is_bearer(&self) -> bool {
        matches!(self, Credentials::Bearer(_))
    }

    /// Returns `true` if this is client certificate authentication.
    pub fn is_client_certificate(&self) -> bool {
        matches!(self, Credentials::ClientCertificate(_))
    }

    /// Returns the client certificate config if applicable.
    pub fn as_client_certificate(&self) -> Option<&ClientCertificateConfig> {
        match self {
            Credentials::ClientCertificate(config) => Some(config),
            _ => None,
        }
    }

    /// Returns the endpoints able to accept these credentials.
    pub fn default_endpoints(&self) -> EndpointSet {
        match self {
            Credentials::ClientCertificate(_) => EndpointSet::client_certificate_endpoints(),
            _ => EndpointSet::default_endpoints(),
        }
    }

    /// Returns the authenticator applying these credentials to requests.
    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        match self {
            Credentials::UsernamePassword(config) => Arc::new(BasicAuthenticator::new(
                config.username.clone(),
                config.password(),
            )),
            Credentials::Bearer(config) => {
                Arc::new(BearerAuthenticator::new(config.provider().clone()))
            }
            Credentials::ClientCertificate(_) => Arc::new(NoopAuthenticator),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::UsernamePassword(config) => {
                f.debug_tuple("UsernamePassword").field(config).finish()
            }
            Credentials::Bearer(config) => f.debug_tuple("Bearer").field(config).finish(),
            Credentials::ClientCertificate(config) => {
                f.debug_tuple("ClientCertificate").field(config).finish()
            }
        }
    }
}

impl From<UsernamePasswordConfig> for Credentials {
    fn from(config: UsernamePasswordConfig) -> Self {
        Credentials::UsernamePassword(config)
    }
}

impl From<BearerCredentialsConfig> for Credentials {
    fn from(config: BearerCredentialsConfig) -> Self {
        Credentials::Bearer(config)
    }
}

impl From<ClientCertificateConfig> for Credentials {
    fn from(config: ClientCertificateConfig) -> Self {
        Credentials::ClientCertificate(config)
    }
}
