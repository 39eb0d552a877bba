//! TLS configuration for secure connections.

use std::path::PathBuf;

/// Configuration for TLS connections to the Verifalia endpoints.
///
/// By default, the SDK uses system root certificates and validates server
/// certificates. Client certificate authentication is configured through
/// [`ClientCertificateConfig`](crate::ClientCertificateConfig) credentials,
/// not here.
///
/// ## Example: Custom CA
///
/// ```rust
/// use verifalia::TlsConfig;
///
/// let config = TlsConfig::builder()
///     .ca_cert_file("/path/to/ca.crt")
///     .build();
/// assert!(config.has_custom_ca());
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct TlsConfig {
    /// Custom CA certificate file path.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// Custom CA certificate PEM data.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Whether to skip certificate verification.
    ///
    /// **WARNING**: This is insecure and should only be used against local
    /// mock servers.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// Creates an insecure TLS config that skips verification.
    ///
    /// **WARNING**: This makes connections vulnerable to man-in-the-middle attacks.
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if a custom CA is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }
}
