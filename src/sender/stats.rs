use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Point-in-time copy of [`DeliveryStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliveryStatsSnapshot {
    pub records_dispatched: u64,
    pub remote_delivered: u64,
    pub remote_failed: u64,
    pub local_lines: u64,
    pub serialization_failures: u64,
    pub average_latency: Duration,
}

/// Counters shared by every call on a dispatcher.
///
/// All updates are relaxed atomics; they never order or block callers.
#[derive(Debug, Default)]
pub struct DeliveryStats {
    records_dispatched: AtomicU64,
    remote_delivered: AtomicU64,
    remote_failed: AtomicU64,
    local_lines: AtomicU64,
    serialization_failures: AtomicU64,
    total_latency_ms: AtomicU64,
}

impl DeliveryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_dispatch(&self) {
        self.records_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery(&self, success: bool, latency: Duration) {
        self.total_latency_ms
            .fetch_add(latency.as_millis() as u64, Ordering::Relaxed);

        if success {
            self.remote_delivered.fetch_add(1, Ordering::Relaxed);
        } else {
            self.remote_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_local_line(&self) {
        self.local_lines.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_serialization_failure(&self) {
        self.serialization_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DeliveryStatsSnapshot {
        let remote_delivered = self.remote_delivered.load(Ordering::Relaxed);
        let remote_failed = self.remote_failed.load(Ordering::Relaxed);
        let attempts = remote_delivered + remote_failed;
        let total_latency_ms = self.total_latency_ms.load(Ordering::Relaxed);

        let average_latency = if attempts > 0 {
            Duration::from_millis(total_latency_ms / attempts)
        } else {
            Duration::ZERO
        };

        DeliveryStatsSnapshot {
            records_dispatched: self.records_dispatched.load(Ordering::Relaxed),
            remote_delivered,
            remote_failed,
            local_lines: self.local_lines.load(Ordering::Relaxed),
            serialization_failures: self.serialization_failures.load(Ordering::Relaxed),
            average_latency,
        }
    }
}
