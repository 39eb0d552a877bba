//! Base URIs of the Verifalia API.
//!
//! The API is served by several interchangeable endpoints. An [`EndpointSet`]
//! lists them in failover priority: every call starts from the first endpoint
//! and moves to the next one only when the current one fails transiently.
//!
//! ```rust
//! use verifalia::EndpointSet;
//!
//! let endpoints = EndpointSet::default_endpoints();
//! assert_eq!(endpoints.len(), 3);
//! assert_eq!(endpoints.primary().as_str(), "https://api-1.verifalia.com/");
//! ```

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::Error;

/// General purpose endpoints.
const DEFAULT_ENDPOINTS: [&str; 3] = [
    "https://api-1.verifalia.com",
    "https://api-2.verifalia.com",
    "https://api-3.verifalia.com",
];

/// Endpoints accepting client-certificate (mutual TLS) authentication.
const CLIENT_CERTIFICATE_ENDPOINTS: [&str; 3] = [
    "https://api-cca-1.verifalia.com",
    "https://api-cca-2.verifalia.com",
    "https://api-cca-3.verifalia.com",
];

/// An absolute base URI (scheme and host, no path) serving the Verifalia API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Parses an endpoint from its base URI.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URI is not an absolute `http` or
    /// `https` URI, or if it carries a path, a query or a fragment.
    pub fn parse(uri: &str) -> Result<Self, Error> {
        let url = Url::parse(uri)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration(format!(
                "unsupported endpoint scheme '{}' in {}",
                url.scheme(),
                uri
            )));
        }
        if url.host().is_none() {
            return Err(Error::configuration(format!("endpoint {} has no host", uri)));
        }
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(Error::configuration(format!(
                "endpoint {} must not carry a path, query or fragment",
                uri
            )));
        }

        Ok(Self { url })
    }

    /// Returns the base URI.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the base URI as a string.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Returns `true` if the endpoint is reached over TLS.
    pub fn is_https(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// Resolves a resource path against this endpoint.
    ///
    /// Leading slashes are ignored, so `"v2.6/credits/balance"` and
    /// `"/v2.6/credits/balance"` resolve to the same URL.
    pub fn resolve(&self, resource: &str) -> Result<Url, Error> {
        self.url
            .join(resource.trim_start_matches('/'))
            .map_err(|e| Error::configuration(format!("invalid resource path '{}': {}", resource, e)))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl std::str::FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// An ordered, immutable, non-empty list of interchangeable endpoints.
///
/// Order defines failover priority. Duplicates are accepted as-is.
/// Cloning is cheap: the list is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    endpoints: Arc<[Endpoint]>,
}

impl EndpointSet {
    /// Creates an endpoint set from already parsed endpoints.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `endpoints` is empty.
    pub fn new(endpoints: impl IntoIterator<Item = Endpoint>) -> Result<Self, Error> {
        let endpoints: Arc<[Endpoint]> = endpoints.into_iter().collect();
        if endpoints.is_empty() {
            return Err(Error::configuration("at least one endpoint is required"));
        }
        Ok(Self { endpoints })
    }

    /// Parses an endpoint set from base URIs, keeping their order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verifalia::EndpointSet;
    ///
    /// let set = EndpointSet::parse(["https://eu.example.com", "https://us.example.com"])?;
    /// assert_eq!(set.len(), 2);
    /// # Ok::<(), verifalia::Error>(())
    /// ```
    pub fn parse<I, S>(uris: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let endpoints = uris
            .into_iter()
            .map(|uri| Endpoint::parse(uri.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(endpoints)
    }

    /// Returns the general purpose endpoints.
    pub fn default_endpoints() -> Self {
        Self::from_constants(&DEFAULT_ENDPOINTS)
    }

    /// Returns the endpoints accepting client-certificate authentication.
    pub fn client_certificate_endpoints() -> Self {
        Self::from_constants(&CLIENT_CERTIFICATE_ENDPOINTS)
    }

    fn from_constants(uris: &[&str]) -> Self {
        Self {
            endpoints: uris.iter().filter_map(|uri| Endpoint::parse(uri).ok()).collect(),
        }
    }

    /// Returns the highest priority endpoint.
    pub fn primary(&self) -> &Endpoint {
        &self.endpoints[0]
    }

    /// Iterates the endpoints in failover order.
    pub fn iter(&self) -> std::slice::Iter<'_, Endpoint> {
        self.endpoints.iter()
    }

    /// Returns the number of endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Always `false`: an endpoint set holds at least one endpoint.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Returns `true` if every endpoint is reached over TLS.
    pub fn all_https(&self) -> bool {
        self.iter().all(Endpoint::is_https)
    }
}

impl<'a> IntoIterator for &'a EndpointSet {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Default for EndpointSet {
    fn default() -> Self {
        Self::default_endpoints()
    }
}
