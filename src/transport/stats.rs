//! Transport counters.

use std::sync::Arc;

use parking_lot::RwLock;

/// A snapshot of transport activity since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Logical calls started.
    pub calls: u64,
    /// Physical attempts sent, across all endpoints.
    pub attempts: u64,
    /// Attempts that moved the call on to the next endpoint.
    pub failovers: u64,
    /// Calls that exhausted every endpoint.
    pub unreachable: u64,
    /// Calls aborted through cancellation.
    pub cancelled: u64,
}

/// Shared, thread-safe counters updated by concurrent calls.
#[derive(Debug, Clone, Default)]
pub(crate) struct StatsRecorder {
    inner: Arc<RwLock<TransportStats>>,
}

impl StatsRecorder {
    pub(crate) fn call_started(&self) {
        self.inner.write().calls += 1;
    }

    pub(crate) fn attempt_sent(&self) {
        self.inner.write().attempts += 1;
    }

    pub(crate) fn failover(&self) {
        self.inner.write().failovers += 1;
    }

    pub(crate) fn unreachable(&self) {
        self.inner.write().unreachable += 1;
    }

    pub(crate) fn cancelled(&self) {
        self.inner.write().cancelled += 1;
    }

    pub(crate) fn snapshot(&self) -> TransportStats {
        *self.inner.read()
    }
}
