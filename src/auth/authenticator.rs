//! Request authenticators.
//!
//! An [`Authenticator`] decorates every outgoing physical request with the
//! credentials it needs, right before it is sent.

use std::{fmt, future::Future, pin::Pin, sync::Arc};

use reqwest::RequestBuilder;

use super::TokenProvider;
use crate::Error;

/// A type alias for the boxed future returned by authenticators.
pub type AuthenticateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RequestBuilder, Error>> + Send + 'a>>;

/// Attaches credentials to outgoing requests.
///
/// Called once per physical attempt, so implementations may be invoked
/// several times for one logical call when the transport fails over.
/// Errors are never retried against other endpoints: they reach the caller
/// as they are.
pub trait Authenticator: Send + Sync {
    /// Returns `request` with credentials attached.
    fn authenticate(&self, request: RequestBuilder) -> AuthenticateFuture<'_>;
}

impl<T: Authenticator + ?Sized> Authenticator for Arc<T> {
    fn authenticate(&self, request: RequestBuilder) -> AuthenticateFuture<'_> {
        (**self).authenticate(request)
    }
}

/// HTTP basic authentication with a username and a password.
///
/// Used for users, sub-accounts and browser app keys alike.
#[derive(Clone)]
pub struct BasicAuthenticator {
    username: Arc<str>,
    password: Arc<str>,
}

impl BasicAuthenticator {
    /// Creates a new basic authenticator.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Arc::from(username.into()),
            password: Arc::from(password.into()),
        }
    }
}

impl fmt::Debug for BasicAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthenticator")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Authenticator for BasicAuthenticator {
    fn authenticate(&self, request: RequestBuilder) -> AuthenticateFuture<'_> {
        Box::pin(async move { Ok(request.basic_auth(&*self.username, Some(&*self.password))) })
    }
}

/// Bearer authentication, with tokens supplied by a [`TokenProvider`].
#[derive(Clone)]
pub struct BearerAuthenticator {
    provider: Arc<dyn TokenProvider>,
}

impl BearerAuthenticator {
    /// Creates a new bearer authenticator.
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self { provider }
    }
}

impl fmt::Debug for BearerAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuthenticator").finish_non_exhaustive()
    }
}

impl Authenticator for BearerAuthenticator {
    fn authenticate(&self, request: RequestBuilder) -> AuthenticateFuture<'_> {
        Box::pin(async move {
            let token = self.provider.get_token().await?;
            if token.is_empty() {
                return Err(Error::unauthorized("token provider returned an empty token"));
            }
            Ok(request.bearer_auth(token))
        })
    }
}

/// Leaves requests untouched.
///
/// Used with client-certificate credentials, whose identity travels in the
/// TLS handshake configured on the HTTP client itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuthenticator;

impl Authenticator for NoopAuthenticator {
    fn authenticate(&self, request: RequestBuilder) -> AuthenticateFuture<'_> {
        Box::pin(async move { Ok(request) })
    }
}
