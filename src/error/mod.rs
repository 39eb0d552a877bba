//! Error types for the Verifalia SDK.
//!
//! - [`Error`]: every failure surfaced by the SDK
//! - [`ErrorKind`]: categorization for `match` statements
//! - [`AttemptError`]: one failed physical attempt against an endpoint
//!
//! ## Failover and Errors
//!
//! A single API call may touch several endpoints. Endpoint-local failures
//! (HTTP 500, connection errors, timeouts) never surface on their own: they
//! are only reported, all together, when every endpoint has failed.
//!
//! ```rust,ignore
//! match client.credits().get_balance().await {
//!     Ok(balance) => println!("{:?}", balance),
//!     Err(err) if err.kind() == ErrorKind::ServiceUnreachable => {
//!         for attempt in err.attempts() {
//!             eprintln!("{} -> {}", attempt.endpoint(), attempt.reason());
//!         }
//!     }
//!     Err(err) => eprintln!("{}", err),
//! }
//! ```

mod attempt;
mod core;
mod kind;

pub use attempt::AttemptError;
pub use core::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for Verifalia operations.
pub type Result<T> = std::result::Result<T, Error>;
