// src/registry.rs

//! Route-keyed bucket registry.

// dependencies
use std::collections::BTreeMap;

use dashmap::DashMap;
use tracing::debug;

use crate::bucket::{BucketSnapshot, TokenBucket};
use crate::config::AdmissionConfig;
use crate::errors::AdmissionError;

/// Owned mapping from route key to its token bucket.
///
/// The key set is fixed at construction; buckets are mutated in place and
/// live for the process lifetime. `DashMap` gives exclusive per-entry access
/// without a global lock, so admissions against different routes never
/// serialize against each other, while refill and consume for one route run
/// under a single entry guard.
#[derive(Debug)]
pub struct BucketRegistry {
    buckets: DashMap<String, TokenBucket>,
}

// methods for the BucketRegistry type
impl BucketRegistry {
    /// Build one full bucket per configured route.
    ///
    /// Validates the configuration first; an empty or invalid configuration
    /// is fatal. Duplicate route keys resolve last-entry-wins (validation
    /// warns about them).
    pub fn from_config(config: &AdmissionConfig, now: u64) -> Result<Self, AdmissionError> {
        config.validate()?;

        let buckets = DashMap::with_capacity(config.routes.len());
        for limit in &config.routes {
            debug!(
                route = %limit.route,
                burst = limit.burst,
                sustained = limit.sustained,
                "initialized route bucket"
            );
            buckets.insert(
                limit.route.clone(),
                TokenBucket::new(limit.burst, limit.sustained, now),
            );
        }
        Ok(Self { buckets })
    }

    /// Whether a bucket exists for the given route key. Buckets are never
    /// created on demand; routes are fixed at startup.
    pub fn contains_route(&self, route: &str) -> bool {
        self.buckets.contains_key(route)
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Refill every bucket from the given clock reading. Driven periodically
    /// by the scheduler so capacity accrues even while no requests arrive.
    pub fn refill_all(&self, now: u64) {
        for mut entry in self.buckets.iter_mut() {
            entry.value_mut().refill(now);
        }
    }

    /// Read-only view of one route's bucket, or `None` if the route is not
    /// registered.
    pub fn snapshot_route(&self, route: &str) -> Option<BucketSnapshot> {
        self.buckets.get(route).map(|entry| entry.value().snapshot())
    }

    /// Read-only snapshot of every bucket, keyed by route and sorted for
    /// stable diagnostics output.
    pub fn snapshot(&self) -> BTreeMap<String, BucketSnapshot> {
        self.buckets
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().snapshot()))
            .collect()
    }

    /// Admission fast path: eager refill, then consume, under one entry
    /// guard. Returns `None` for an unknown route, otherwise whether a token
    /// was granted and how many remain.
    pub(crate) fn refill_then_consume(&self, route: &str, now: u64) -> Option<(bool, u64)> {
        let mut bucket = self.buckets.get_mut(route)?;
        bucket.refill(now);
        let granted = bucket.consume();
        Some((granted, bucket.tokens()))
    }
}
