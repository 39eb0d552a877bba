//! # Verifalia Rust SDK
//!
//! Rust SDK for the Verifalia email verification API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use verifalia::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Create client
//!     let client = Client::builder()
//!         .credentials(UsernamePasswordConfig::new("samantha", "42"))
//!         .build()?;
//!
//!     // Validate and wait for the results
//!     let validation = client
//!         .email_validations()
//!         .submit(
//!             ValidationRequest::new(["batman@gmail.com", "robin@gotham.com"]),
//!             WaitOptions::default(),
//!         )
//!         .await?;
//!
//!     for entry in &validation.entries {
//!         println!("{} => {:?}", entry.input_data, entry.classification);
//!     }
//!
//!     // Check the remaining credits
//!     let balance = client.credits().get_balance().await?;
//!     println!("Credit packs: {}", balance.credit_packs);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Client Hierarchy**: `Client` → `EmailValidationsClient` / `CreditsClient`
//! - **Failover**: every call walks the endpoints in order; only HTTP 500 and
//!   network failures move on to the next endpoint
//! - **Unreachable ≠ Error Status**: a 4xx answer is returned immediately;
//!   [`ErrorKind::ServiceUnreachable`] means every endpoint failed
//! - **Cancellation**: dropping a future cancels the call;
//!   [`CancellationToken`] cancels it from elsewhere
//!
//! ## Features
//!
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod types;

// Transport layer
pub mod transport;

// Operations
pub mod credits;
pub mod validations;

mod user_agent;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder};
pub use endpoints::{Endpoint, EndpointSet};
pub use error::{AttemptError, Error, ErrorKind, Result};
pub use types::{Page, PageInfo, SortOrder};

// Re-export auth types
pub use auth::{
    Authenticator, BearerCredentialsConfig, ClientCertificateConfig, Credentials, TokenProvider,
    UsernamePasswordConfig,
};

// Re-export config types
pub use config::{PoolConfig, ProgressCallback, TlsConfig, WaitOptions};

// Re-export operation types
pub use credits::{Balance, CreditsClient, DailyUsage, ListDailyUsagesRequest};
pub use validations::{
    Callback, Classification, Deduplication, EmailValidationsClient, EntryStatus,
    ListEntriesRequest, ListValidationsRequest, Progress, QualityLevel, RequestEntry, Validation,
    ValidationEntry, ValidationOverview, ValidationRequest, ValidationStatus,
};

pub use tokio_util::sync::CancellationToken;
