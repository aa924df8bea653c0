//! Operation counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Lock-free (atomics with Relaxed ordering; exactness across counters is
//!   not required)

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Registry of service counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Todos created through the API
    todos_created: AtomicU64,
    /// Successful updates
    todos_updated: AtomicU64,
    /// Successful deletes
    todos_deleted: AtomicU64,
    /// Get/update/delete calls that referenced an unknown id
    lookups_missed: AtomicU64,
    /// Requests answered with a 4xx/5xx before reaching the store
    requests_rejected: AtomicU64,
}

impl MetricsRegistry {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_created(&self) {
        self.todos_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updated(&self) {
        self.todos_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deleted(&self) {
        self.todos_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lookups_missed(&self) {
        self.lookups_missed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            todos_created: self.todos_created.load(Ordering::Relaxed),
            todos_updated: self.todos_updated.load(Ordering::Relaxed),
            todos_deleted: self.todos_deleted.load(Ordering::Relaxed),
            lookups_missed: self.lookups_missed.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub todos_created: u64,
    pub todos_updated: u64,
    pub todos_deleted: u64,
    pub lookups_missed: u64,
    pub requests_rejected: u64,
}
