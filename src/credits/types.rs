//! Credit balance and usage.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::timespan;

/// Credits available to the account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Credit packs, which never expire.
    #[serde(default)]
    pub credit_packs: f64,

    /// Daily free credits, if the plan includes them.
    #[serde(default)]
    pub free_credits: Option<f64>,

    /// Time until the free credits are reset.
    #[serde(default, with = "timespan::option")]
    pub free_credits_reset_in: Option<Duration>,
}

/// Credits consumed on one day.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUsage {
    /// The day.
    pub date: NaiveDate,

    /// Credit packs consumed.
    #[serde(default)]
    pub credit_packs: f64,

    /// Free credits consumed.
    #[serde(default)]
    pub free_credits: f64,
}
