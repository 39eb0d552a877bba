//! Credit balance and daily usage.

mod client;
mod types;

pub use client::{CreditsClient, ListDailyUsagesRequest};
pub use types::{Balance, DailyUsage};
