//! Email validation jobs and their entries.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ListSegment, Page, timespan};

// ============================================================================
// Enumerations
// ============================================================================

/// Processing status of a validation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// The job is being processed.
    InProgress,
    /// Every entry has been validated.
    Completed,
    /// The job was deleted.
    Deleted,
    /// The job expired and its results are gone.
    Expired,
    /// A status this SDK version does not know about.
    #[serde(other)]
    Unknown,
}

/// Results quality level; higher levels take longer and cost more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QualityLevel {
    /// The default quality level.
    #[default]
    Standard,
    /// Higher accuracy.
    High,
    /// The highest accuracy.
    Extreme,
}

/// Strategy used to detect duplicate entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Deduplication {
    /// Duplicates are not detected.
    #[default]
    Off,
    /// Only exact duplicates are marked.
    Safe,
    /// Duplicates are detected ignoring provider-specific syntax rules.
    Relaxed,
}

/// High-level outcome of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// The address accepts mail.
    Deliverable,
    /// The address may bounce or harm sender reputation.
    Risky,
    /// The address does not accept mail.
    Undeliverable,
    /// The outcome could not be determined.
    #[serde(other)]
    Unknown,
}

/// Detailed outcome of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum EntryStatus {
    Success,
    CatchAllConnectionFailure,
    CatchAllValidationTimeout,
    DnsConnectionFailure,
    DnsQueryTimeout,
    DomainDoesNotExist,
    DomainHasNullMx,
    DomainIsMisconfigured,
    DomainIsWellKnownDea,
    DomainPartCompliancyFailure,
    DoubleDotSequence,
    Duplicate,
    InvalidAddressLength,
    InvalidCharacterInSequence,
    InvalidEmptyQuotedWord,
    InvalidFoldingWhiteSpaceSequence,
    InvalidLocalPartLength,
    InvalidWordBoundaryStart,
    IspSpecificSyntaxFailure,
    LocalEndPointRejected,
    LocalPartIsWellKnownRoleAccount,
    LocalSenderAddressRejected,
    MailboxConnectionFailure,
    MailboxDoesNotExist,
    MailboxIsDea,
    MailboxTemporarilyUnavailable,
    MailboxValidationTimeout,
    MailExchangerIsHoneypot,
    MailExchangerIsParked,
    MailExchangerIsWellKnownDea,
    OverrideMatch,
    ServerDoesNotSupportInternationalMailboxes,
    ServerIsCatchAll,
    ServerTemporaryUnavailable,
    SmtpConnectionFailure,
    SmtpConnectionTimeout,
    SmtpDialogError,
    UnacceptableDomainLiteral,
    UnbalancedCommentParenthesis,
    UnexpectedQuotedPairSequence,
    UnhandledException,
    UnmatchedQuotedPair,
    /// A status this SDK version does not know about.
    #[serde(other)]
    Unknown,
}

/// Returns the wire name of a unit enum variant.
pub(crate) fn wire_name<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_value(value).ok()? {
        serde_json::Value::String(name) => Some(name),
        _ => None,
    }
}

// ============================================================================
// Jobs
// ============================================================================

/// Progress of a job still being processed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Completion ratio, from 0.0 to 1.0.
    #[serde(default)]
    pub percentage: f64,

    /// Estimated time until completion.
    #[serde(default, with = "timespan::option")]
    pub estimated_time_remaining: Option<Duration>,
}

/// Summary of a validation job.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOverview {
    /// Unique job identifier.
    pub id: String,

    /// Processing status.
    pub status: ValidationStatus,

    /// When the job was submitted.
    pub submitted_on: DateTime<Utc>,

    /// When the job was created, if different from submission.
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,

    /// When the job completed.
    #[serde(default)]
    pub completed_on: Option<DateTime<Utc>>,

    /// Optional user-defined name.
    #[serde(default)]
    pub name: Option<String>,

    /// Identifier of the user owning the job.
    #[serde(default)]
    pub owner: Option<String>,

    /// IP address of the submitting client.
    #[serde(default, rename = "clientIP")]
    pub client_ip: Option<String>,

    /// Results quality level.
    #[serde(default)]
    pub quality: Option<QualityLevel>,

    /// Deduplication strategy.
    #[serde(default)]
    pub deduplication: Option<Deduplication>,

    /// Processing priority, 0 to 255.
    #[serde(default)]
    pub priority: Option<u8>,

    /// How long results are kept after completion.
    #[serde(default, with = "timespan::option")]
    pub retention: Option<Duration>,

    /// Number of entries in the job.
    #[serde(default)]
    pub no_of_entries: u32,

    /// Progress, while the job is in progress.
    #[serde(default)]
    pub progress: Option<Progress>,
}

impl ValidationOverview {
    /// Returns `true` once the job has completed.
    pub fn is_completed(&self) -> bool {
        self.status == ValidationStatus::Completed
    }
}

/// The validation outcome of one entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationEntry {
    /// Zero-based position within the submitted entries.
    #[serde(default)]
    pub index: u32,

    /// The input, as submitted.
    pub input_data: String,

    /// High-level outcome.
    pub classification: Classification,

    /// Detailed outcome.
    pub status: EntryStatus,

    /// The normalized email address, when the syntax is valid.
    #[serde(default)]
    pub email_address: Option<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub email_address_local_part: Option<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub email_address_domain_part: Option<String>,

    /// The domain part in its ASCII (punycode) form.
    #[serde(default)]
    pub ascii_email_address_domain_part: Option<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub has_international_mailbox_name: Option<bool>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub has_international_domain_name: Option<bool>,

    /// Whether the address belongs to a disposable email provider.
    #[serde(default)]
    pub is_disposable_email_address: Option<bool>,

    /// Whether the local part is a role account, such as `info@`.
    #[serde(default)]
    pub is_role_account: Option<bool>,

    /// Whether the address belongs to a free email provider.
    #[serde(default)]
    pub is_free_email_address: Option<bool>,

    /// Position of the first syntax error.
    #[serde(default)]
    pub syntax_failure_index: Option<u32>,

    /// Custom string passed along with the entry.
    #[serde(default)]
    pub custom: Option<String>,

    /// Index of the entry this one duplicates.
    #[serde(default)]
    pub duplicate_of: Option<u32>,

    /// When this entry completed.
    #[serde(default)]
    pub completed_on: Option<DateTime<Utc>>,

    /// Corrections suggested for likely typos.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// A validation job: its overview and, once completed, its entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// Job summary.
    pub overview: ValidationOverview,

    /// Entry results; empty while the job is in progress.
    pub entries: Vec<ValidationEntry>,
}

impl Validation {
    /// Returns the job identifier.
    pub fn id(&self) -> &str {
        &self.overview.id
    }

    /// Returns `true` once the job has completed.
    pub fn is_completed(&self) -> bool {
        self.overview.is_completed()
    }
}

/// A job as returned by the API, entries possibly truncated.
#[derive(Debug, Deserialize)]
pub(crate) struct ValidationSnapshot {
    pub overview: ValidationOverview,
    #[serde(default)]
    pub entries: Option<ListSegment<ValidationEntry>>,
}

impl ValidationSnapshot {
    /// Splits the snapshot into a job and its first page of entries.
    pub(crate) fn into_parts(self) -> (Validation, Page<ValidationEntry>) {
        let page = self.entries.map(Page::from).unwrap_or_default();
        (
            Validation {
                overview: self.overview,
                entries: Vec::new(),
            },
            page,
        )
    }
}

// ============================================================================
// Submission
// ============================================================================

/// One input to validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEntry {
    /// The email address to validate.
    pub input_data: String,

    /// Custom string returned along with the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

impl RequestEntry {
    /// Creates an entry.
    pub fn new(input_data: impl Into<String>) -> Self {
        Self {
            input_data: input_data.into(),
            custom: None,
        }
    }

    /// Attaches a custom string.
    #[must_use]
    pub fn with_custom(mut self, custom: impl Into<String>) -> Self {
        self.custom = Some(custom.into());
        self
    }
}

impl From<&str> for RequestEntry {
    fn from(input_data: &str) -> Self {
        Self::new(input_data)
    }
}

impl From<String> for RequestEntry {
    fn from(input_data: String) -> Self {
        Self::new(input_data)
    }
}

/// Completion callback settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Callback {
    /// URL notified once the job completes.
    pub url: String,
}

/// A new validation job.
///
/// ```rust
/// use std::time::Duration;
/// use verifalia::{QualityLevel, RequestEntry, ValidationRequest};
///
/// let request = ValidationRequest::new([
///     RequestEntry::new("batman@gmail.com").with_custom("hero"),
///     RequestEntry::new("joker@gmail.com"),
/// ])
/// .with_quality(QualityLevel::High)
/// .with_retention(Duration::from_secs(3600));
/// assert_eq!(request.entries.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    /// Entries to validate.
    pub entries: Vec<RequestEntry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub quality: Option<QualityLevel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub deduplication: Option<Deduplication>,

    /// Processing priority, 0 to 255.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,

    /// User-defined job name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// How long results are kept after completion.
    #[serde(skip_serializing_if = "Option::is_none", with = "timespan::option")]
    pub retention: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub callback: Option<Callback>,
}

impl ValidationRequest {
    /// Creates a request for the given entries.
    pub fn new<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<RequestEntry>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            quality: None,
            deduplication: None,
            priority: None,
            name: None,
            retention: None,
            callback: None,
        }
    }

    /// Sets the quality level.
    #[must_use]
    pub fn with_quality(mut self, quality: QualityLevel) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Sets the deduplication strategy.
    #[must_use]
    pub fn with_deduplication(mut self, deduplication: Deduplication) -> Self {
        self.deduplication = Some(deduplication);
        self
    }

    /// Sets the processing priority.
    #[must_use]
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the job name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the results retention period.
    #[must_use]
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = Some(retention);
        self
    }

    /// Sets the completion callback URL.
    #[must_use]
    pub fn with_callback(mut self, url: impl Into<String>) -> Self {
        self.callback = Some(Callback { url: url.into() });
        self
    }
}
