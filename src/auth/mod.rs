//! Authentication and credentials for the Verifalia SDK.
//!
//! - [`Credentials`]: username/password, bearer token or client certificate
//! - [`Authenticator`]: applies credentials to each outgoing request
//! - [`TokenProvider`]: trait for custom bearer token sources
//!
//! ## Username and Password
//!
//! ```rust,ignore
//! use verifalia::{Client, UsernamePasswordConfig};
//!
//! let client = Client::builder()
//!     .credentials(UsernamePasswordConfig::new("samantha", "42"))
//!     .build()?;
//! ```
//!
//! ## Client Certificate
//!
//! ```rust,ignore
//! use verifalia::{Client, ClientCertificateConfig};
//!
//! // Selects the client-certificate endpoints automatically
//! let client = Client::builder()
//!     .credentials(ClientCertificateConfig::from_pem_file("identity.pem")?)
//!     .build()?;
//! ```

mod authenticator;
mod credentials;
mod token;

pub use authenticator::{
    AuthenticateFuture, Authenticator, BasicAuthenticator, BearerAuthenticator, NoopAuthenticator,
};
pub use credentials::{
    BearerCredentialsConfig, ClientCertificateConfig, Credentials, UsernamePasswordConfig,
};
pub use token::{StaticTokenProvider, TokenFuture, TokenProvider};
