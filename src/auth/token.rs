//! Token provider trait for bearer authentication.

use std::{future::Future, pin::Pin, sync::Arc};

use crate::Error;

/// A type alias for the boxed future returned by token providers.
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<String, Error>> + Send + 'a>>;

/// Trait for supplying bearer tokens to the SDK.
///
/// The provider is asked for a token before every physical attempt, so it can
/// cache, refresh or fetch tokens from an external service as it sees fit.
///
/// ## Object Safety
///
/// This trait is object-safe and can be used as `Arc<dyn TokenProvider>`.
///
/// ## Example: Environment Variable Provider
///
/// ```rust
/// use verifalia::TokenProvider;
///
/// struct EnvTokenProvider {
///     env_var: String,
/// }
///
/// impl TokenProvider for EnvTokenProvider {
///     fn get_token(&self) -> verifalia::auth::TokenFuture<'_> {
///         let env_var = self.env_var.clone();
///         Box::pin(async move {
///             std::env::var(&env_var).map_err(|_| {
///                 verifalia::Error::configuration(format!("environment variable {} not set", env_var))
///             })
///         })
///     }
/// }
/// ```
pub trait TokenProvider: Send + Sync {
    /// Returns a future that resolves to a bearer token.
    ///
    /// # Errors
    ///
    /// Return an error if the token cannot be obtained. The SDK propagates it
    /// to the caller without trying any other endpoint.
    fn get_token(&self) -> TokenFuture<'_>;
}

impl<T: TokenProvider + ?Sized> TokenProvider for Arc<T> {
    fn get_token(&self) -> TokenFuture<'_> {
        (**self).get_token()
    }
}

impl<T: TokenProvider + ?Sized> TokenProvider for Box<T> {
    fn get_token(&self) -> TokenFuture<'_> {
        (**self).get_token()
    }
}

/// A simple static token provider.
///
/// Always returns the same token. Useful when the token lifecycle is handled
/// outside of the SDK.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: Arc<str>,
}

impl StaticTokenProvider {
    /// Creates a new static token provider.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl TokenProvider for StaticTokenProvider {
    fn get_token(&self) -> TokenFuture<'_> {
        let token = self.token.clone();
        Box::pin(async move { Ok(token.to_string()) })
    }
}
