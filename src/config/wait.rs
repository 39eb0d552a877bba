//! Polling behaviour for long-running validation jobs.

use std::{fmt, sync::Arc, time::Duration};

use tokio_util::sync::CancellationToken;

use crate::validations::ValidationOverview;

/// Callback invoked with the job overview after every unfinished poll.
pub type ProgressCallback = Arc<dyn Fn(&ValidationOverview) + Send + Sync>;

/// Controls how the SDK waits for a validation job to complete.
///
/// The API holds each request open for up to `wait_time` when the job is
/// still running, then answers with the job overview. Between polls the
/// client sleeps for an exponentially growing, jittered delay.
///
/// ## Default Values
///
/// - `wait_for_completion`: true
/// - `wait_time`: 30s
/// - `poll_delay`: 500ms
/// - `max_poll_delay`: 30s
/// - `multiplier`: 1.5
/// - `jitter`: 0.1 (10%)
///
/// ## Example
///
/// ```rust
/// use verifalia::WaitOptions;
/// use std::time::Duration;
///
/// let options = WaitOptions::new()
///     .with_max_polls(20)
///     .with_deadline(Duration::from_secs(300))
///     .with_progress(|overview| println!("{:?}", overview.progress));
/// ```
#[derive(Clone)]
pub struct WaitOptions {
    /// Whether to poll until the job completes.
    pub wait_for_completion: bool,

    /// How long the server may hold each request while the job runs.
    pub wait_time: Duration,

    /// Delay before the first poll.
    pub poll_delay: Duration,

    /// Maximum delay between polls.
    pub max_poll_delay: Duration,

    /// Multiplier applied to the delay after every poll.
    pub multiplier: f64,

    /// Jitter factor (0.0 to 1.0) applied to delays.
    pub jitter: f64,

    /// Maximum number of polls, if bounded.
    pub max_polls: Option<u32>,

    /// Overall time budget for waiting, if bounded.
    pub deadline: Option<Duration>,

    progress: Option<ProgressCallback>,

    cancellation: Option<CancellationToken>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            wait_for_completion: true,
            wait_time: Duration::from_secs(30),
            poll_delay: Duration::from_millis(500),
            max_poll_delay: Duration::from_secs(30),
            multiplier: 1.5,
            jitter: 0.1,
            max_polls: None,
            deadline: None,
            progress: None,
            cancellation: None,
        }
    }
}

impl WaitOptions {
    /// Creates wait options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns options that never poll: the first answer is returned as-is.
    pub fn no_wait() -> Self {
        Self {
            wait_for_completion: false,
            wait_time: Duration::ZERO,
            ..Default::default()
        }
    }

    /// Sets the server-side wait time for each request.
    #[must_use]
    pub fn with_wait_time(mut self, wait_time: Duration) -> Self {
        self.wait_time = wait_time;
        self
    }

    /// Sets the delay before the first poll.
    #[must_use]
    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }

    /// Sets the maximum delay between polls.
    #[must_use]
    pub fn with_max_poll_delay(mut self, delay: Duration) -> Self {
        self.max_poll_delay = delay;
        self
    }

    /// Sets the backoff multiplier.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier.max(1.0);
        self
    }

    /// Sets the jitter factor.
    #[must_use]
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Limits the number of polls.
    #[must_use]
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls);
        self
    }

    /// Limits the total time spent waiting.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Registers a callback receiving the overview of an unfinished job.
    #[must_use]
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ValidationOverview) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Sets the token that stops waiting, and any request in flight.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Returns the cancellation token, if any.
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Returns the progress callback, if any.
    pub fn progress(&self) -> Option<&ProgressCallback> {
        self.progress.as_ref()
    }

    /// Calculates the delay before a given poll (1-based).
    ///
    /// `poll_delay * multiplier^(poll - 1)`, capped at `max_poll_delay`,
    /// with jitter.
    pub fn delay_for_poll(&self, poll: u32) -> Duration {
        if poll == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(poll - 1).unwrap_or(i32::MAX);
        let base_delay = self.poll_delay.as_secs_f64() * self.multiplier.powi(exponent);
        let capped_delay = base_delay.min(self.max_poll_delay.as_secs_f64());

        let jittered = if self.jitter > 0.0 {
            let jitter_range = capped_delay * self.jitter;
            let jitter_offset = (fastrand::f64() - 0.5) * 2.0 * jitter_range;
            (capped_delay + jitter_offset).max(0.0)
        } else {
            capped_delay
        };

        Duration::from_secs_f64(jittered)
    }

    /// Returns `true` if another poll is allowed after `polls` polls.
    pub fn allows_poll(&self, polls: u32) -> bool {
        self.max_polls.is_none_or(|max| polls < max)
    }
}

impl fmt::Debug for WaitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitOptions")
            .field("wait_for_completion", &self.wait_for_completion)
            .field("wait_time", &self.wait_time)
            .field("poll_delay", &self.poll_delay)
            .field("max_poll_delay", &self.max_poll_delay)
            .field("max_polls", &self.max_polls)
            .field("deadline", &self.deadline)
            .field("has_progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}
