//! Error kind enumeration for categorizing SDK errors.

/// Categorization of SDK errors.
///
/// This enum provides a stable interface for matching on error types, enabling
/// different handling strategies for different failure modes.
///
/// ## Retriable vs Non-Retriable
///
/// | ErrorKind            | Retriable | Action                          |
/// |----------------------|-----------|---------------------------------|
/// | `Unavailable`        | Yes       | Retry with backoff              |
/// | `Timeout`            | Yes       | Retry with backoff              |
/// | `RateLimited`        | Yes       | Use `retry_after()` delay       |
/// | `ServiceUnreachable` | Yes       | Every endpoint failed; back off |
/// | `Unauthorized`       | No        | Fix credentials                 |
/// | `InsufficientCredit` | No        | Top up the account              |
/// | `Forbidden`          | No        | Fix permissions                 |
/// | `NotFound`, `Gone`   | No        | Job doesn't exist anymore       |
/// | `InvalidArgument`    | No        | Fix input                       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Authentication failed (invalid or expired credentials).
    ///
    /// HTTP: 401 Unauthorized
    ///
    /// **Not retriable.** Fix credentials and retry.
    #[error("unauthorized")]
    Unauthorized,

    /// The account does not have enough credit to fulfill the request.
    ///
    /// HTTP: 402 Payment Required
    ///
    /// **Not retriable.** Add credit packs or wait for the free credits reset.
    #[error("insufficient credit")]
    InsufficientCredit,

    /// Valid credentials, but the operation is not allowed for them.
    ///
    /// HTTP: 403 Forbidden
    ///
    /// **Not retriable.** Fix permissions (e.g. the user or app key ACL) and retry.
    #[error("forbidden")]
    Forbidden,

    /// Requested resource was not found.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// Requested resource existed but has been deleted or has expired.
    ///
    /// HTTP: 410 Gone
    #[error("gone")]
    Gone,

    /// Invalid request argument or payload.
    ///
    /// HTTP: 400 Bad Request
    ///
    /// **Not retriable.** Fix the input and retry.
    #[error("invalid argument")]
    InvalidArgument,

    /// Rate limit exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    ///
    /// **Retriable.** Use `Error::retry_after()` for the recommended delay.
    #[error("rate limited")]
    RateLimited,

    /// Service temporarily unavailable.
    ///
    /// HTTP: 502, 503 and other server errors returned to the caller
    ///
    /// **Retriable.** Retry with exponential backoff.
    #[error("service unavailable")]
    Unavailable,

    /// Request timed out.
    ///
    /// HTTP: 504 Gateway Timeout or client-side timeout
    ///
    /// **Retriable.** Retry with exponential backoff.
    #[error("timeout")]
    Timeout,

    /// Internal error, on either side of the wire.
    #[error("internal error")]
    Internal,

    /// The operation was cancelled through its cancellation token.
    ///
    /// **Not retriable.** The operation was intentionally cancelled.
    #[error("cancelled")]
    Cancelled,

    /// Every configured endpoint failed within a single call.
    ///
    /// The error carries one [`AttemptError`](crate::AttemptError) per endpoint,
    /// see [`Error::attempts()`](crate::Error::attempts).
    ///
    /// **Retriable**, although every endpoint was just tried.
    #[error("service unreachable")]
    ServiceUnreachable,

    /// Configuration error (invalid endpoint, missing credentials).
    ///
    /// **Not retriable.** Fix the configuration.
    #[error("configuration error")]
    Configuration,

    /// Invalid response from server.
    ///
    /// Response could not be parsed or was malformed.
    ///
    /// **Not retriable** without server-side fix.
    #[error("invalid response")]
    InvalidResponse,

    /// Unknown or unexpected error.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` if this error kind is generally safe to retry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verifalia::ErrorKind;
    ///
    /// assert!(ErrorKind::Timeout.is_retriable());
    /// assert!(!ErrorKind::InsufficientCredit.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unavailable
                | ErrorKind::Timeout
                | ErrorKind::RateLimited
                | ErrorKind::ServiceUnreachable
        )
    }

    /// Creates an `ErrorKind` from an HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            402 => ErrorKind::InsufficientCredit,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            410 => ErrorKind::Gone,
            429 => ErrorKind::RateLimited,
            500 => ErrorKind::Internal,
            504 => ErrorKind::Timeout,
            _ if (400..500).contains(&status) => ErrorKind::InvalidArgument,
            _ if status >= 500 => ErrorKind::Unavailable,
            _ => ErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_is_retriable() {
        assert!(ErrorKind::Unavailable.is_retriable());
        assert!(ErrorKind::Timeout.is_retriable());
        assert!(ErrorKind::RateLimited.is_retriable());
        assert!(ErrorKind::ServiceUnreachable.is_retriable());

        assert!(!ErrorKind::Unauthorized.is_retriable());
        assert!(!ErrorKind::InsufficientCredit.is_retriable());
        assert!(!ErrorKind::Forbidden.is_retriable());
        assert!(!ErrorKind::NotFound.is_retriable());
        assert!(!ErrorKind::Gone.is_retriable());
        assert!(!ErrorKind::InvalidArgument.is_retriable());
        assert!(!ErrorKind::Internal.is_retriable());
        assert!(!ErrorKind::Cancelled.is_retriable());
        assert!(!ErrorKind::Configuration.is_retriable());
        assert!(!ErrorKind::Unknown.is_retriable());
    }

    #[test_case(400, ErrorKind::InvalidArgument)]
    #[test_case(401, ErrorKind::Unauthorized)]
    #[test_case(402, ErrorKind::InsufficientCredit)]
    #[test_case(403, ErrorKind::Forbidden)]
    #[test_case(404, ErrorKind::NotFound)]
    #[test_case(410, ErrorKind::Gone)]
    #[test_case(422, ErrorKind::InvalidArgument)]
    #[test_case(429, ErrorKind::RateLimited)]
    #[test_case(500, ErrorKind::Internal)]
    #[test_case(502, ErrorKind::Unavailable)]
    #[test_case(503, ErrorKind::Unavailable)]
    #[test_case(504, ErrorKind::Timeout)]
    #[test_case(301, ErrorKind::Unknown)]
    fn test_from_http_status(status: u16, expected: ErrorKind) {
        assert_eq!(ErrorKind::from_http_status(status), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorKind::Unauthorized.to_string(), "unauthorized");
        assert_eq!(ErrorKind::InsufficientCredit.to_string(), "insufficient credit");
        assert_eq!(ErrorKind::Gone.to_string(), "gone");
        assert_eq!(ErrorKind::ServiceUnreachable.to_string(), "service unreachable");
        assert_eq!(ErrorKind::Cancelled.to_string(), "cancelled");
        assert_eq!(ErrorKind::InvalidResponse.to_string(), "invalid response");
    }

    #[test]
    fn test_error_kind_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ErrorKind::Timeout);
        set.insert(ErrorKind::Unavailable);
        set.insert(ErrorKind::Timeout);
        assert_eq!(set.len(), 2);
    }
}
