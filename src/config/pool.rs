//! HTTP connection pool settings.

use std::time::Duration;

/// Connection pool configuration for the shared HTTP client.
///
/// One pool serves every endpoint of the set and every concurrent call.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Idle connection timeout.
    pub idle_timeout: Duration,
    /// Maximum idle connections per host.
    pub max_idle_per_host: usize,
    /// TCP keepalive interval, if any.
    pub tcp_keepalive: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(90),
            max_idle_per_host: 10,
            tcp_keepalive: Some(Duration::from_secs(60)),
        }
    }
}

impl PoolConfig {
    /// Creates a pool configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the idle connection timeout.
    #[must_use]
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Sets the maximum number of idle connections kept per host.
    #[must_use]
    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }

    /// Sets the TCP keepalive interval; `None` disables it.
    #[must_use]
    pub fn with_tcp_keepalive(mut self, interval: Option<Duration>) -> Self {
        self.tcp_keepalive = interval;
        self
    }
}
