//! Export metrics for observability
//!
//! Counts what happened to each record handed to a [`GelfTarget`]: published,
//! rejected by the validator or lost to a transport failure.
//!
//! [`GelfTarget`]: crate::core::GelfTarget

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for export observability
///
/// # Example
///
/// ```
/// use rust_gelf_target::TargetMetrics;
///
/// let metrics = TargetMetrics::new();
/// metrics.record_published();
/// metrics.record_failed();
///
/// assert_eq!(metrics.published_count(), 1);
/// assert_eq!(metrics.failed_count(), 1);
/// ```
#[derive(Debug)]
pub struct TargetMetrics {
    /// Messages delivered to every transport
    published_count: AtomicU64,

    /// Records that could not be turned into a valid message
    rejected_count: AtomicU64,

    /// Messages a transport failed to deliver
    failed_count: AtomicU64,
}

impl TargetMetrics {
    pub const fn new() -> Self {
        Self {
            published_count: AtomicU64::new(0),
            rejected_count: AtomicU64::new(0),
            failed_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn published_count(&self) -> u64 {
        self.published_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected_count(&self) -> u64 {
        self.rejected_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed_count.load(Ordering::Relaxed)
    }

    /// Record a published message, returning the previous count
    #[inline]
    pub fn record_published(&self) -> u64 {
        self.published_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of attempted messages that failed in transport (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_count() as f64;
        let total = self.published_count() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.published_count.store(0, Ordering::Relaxed);
        self.rejected_count.store(0, Ordering::Relaxed);
        self.failed_count.store(0, Ordering::Relaxed);
    }
}

impl Default for TargetMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TargetMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            published_count: AtomicU64::new(self.published_count()),
            rejected_count: AtomicU64::new(self.rejected_count()),
            failed_count: AtomicU64::new(self.failed_count()),
        }
    }
}
