//! Prelude module for convenient imports.
//!
//! ```rust
//! use verifalia::prelude::*;
//! ```
//!
//! This provides access to:
//! - Core client types
//! - Error types
//! - Credentials
//! - Validation and credit types

pub use crate::{
    auth::{BearerCredentialsConfig, ClientCertificateConfig, Credentials, UsernamePasswordConfig},
    client::{Client, ClientBuilder},
    config::{TlsConfig, WaitOptions},
    credits::{Balance, DailyUsage},
    endpoints::EndpointSet,
    error::{Error, ErrorKind, Result},
    types::{Page, SortOrder},
    validations::{
        Classification, Deduplication, EntryStatus, QualityLevel, RequestEntry, Validation,
        ValidationEntry, ValidationOverview, ValidationRequest, ValidationStatus,
    },
    CancellationToken,
};
