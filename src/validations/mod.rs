//! Email validation jobs.
//!
//! A job validates a batch of email addresses. The API either completes it
//! within the requested wait time or answers with its overview, and the
//! [`EmailValidationsClient`] keeps polling as [`WaitOptions`](crate::WaitOptions)
//! allow.

mod client;
mod types;

pub use client::{EmailValidationsClient, ListEntriesRequest, ListValidationsRequest};
pub(crate) use client::format_date;
pub use types::{
    Callback, Classification, Deduplication, EntryStatus, Progress, QualityLevel, RequestEntry,
    Validation, ValidationEntry, ValidationOverview, ValidationRequest, ValidationStatus,
};
