//! Configuration types for the Verifalia SDK.
//!
//! - [`TlsConfig`]: TLS settings
//! - [`PoolConfig`]: HTTP connection pooling
//! - [`WaitOptions`]: polling behaviour for validation jobs

mod pool;
mod tls;
mod wait;

pub use pool::PoolConfig;
pub use tls::TlsConfig;
pub use wait::{ProgressCallback, WaitOptions};
