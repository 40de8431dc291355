// src/bucket.rs

//! Token bucket accounting for a single route.

// dependencies
use serde::Serialize;
use tracing::trace;

/// Length of the sustained-rate accounting window, in nanoseconds.
/// The sustained rate is expressed in tokens per minute.
const MINUTE_NANOS: u64 = 60_000_000_000;

/// Replenishable consumption budget for one route.
///
/// The bucket starts full at `burst` tokens. Elapsed wall-clock time converts
/// into whole tokens at the sustained rate, capped at `burst`; each admitted
/// request consumes exactly one token. All timing values are nanoseconds since
/// the Unix epoch, supplied by the caller so the math stays deterministic.
#[derive(Debug)]
pub struct TokenBucket {
    tokens: u64,
    burst: u64,
    sustained: u64,
    refill_interval_nanos: u64,
    last_refill_nanos: u64,
}

// methods for the TokenBucket type
impl TokenBucket {
    /// Create a full bucket.
    ///
    /// `burst` is the maximum capacity, `sustained` the replenishment rate in
    /// tokens per minute; both must be positive (enforced upstream by config
    /// validation). `now` seeds the refill timestamp.
    pub fn new(burst: u64, sustained: u64, now: u64) -> Self {
        Self {
            tokens: burst,
            burst,
            sustained,
            // A rate above one token per nanosecond still needs a non-zero
            // interval for the division below.
            refill_interval_nanos: (MINUTE_NANOS / sustained.max(1)).max(1),
            last_refill_nanos: now,
        }
    }

    // accessor method to return the current token count
    pub fn tokens(&self) -> u64 {
        self.tokens
    }

    // accessor method to return the burst limit
    pub fn burst(&self) -> u64 {
        self.burst
    }

    // accessor method to return the sustained rate (tokens per minute)
    pub fn sustained(&self) -> u64 {
        self.sustained
    }

    /// Convert elapsed time since the last refill into whole tokens.
    ///
    /// The refill timestamp advances only by the time accounted for by the
    /// tokens actually earned, so a fractional remainder carries forward to
    /// the next call instead of being lost. Calling this with no whole token
    /// accrued is a strict no-op. Returns the number of tokens added.
    pub fn refill(&mut self, now: u64) -> u64 {
        let elapsed = now.saturating_sub(self.last_refill_nanos);
        let earned = elapsed / self.refill_interval_nanos;
        if earned == 0 {
            return 0;
        }

        let before = self.tokens;
        self.tokens = self.tokens.saturating_add(earned).min(self.burst);
        self.last_refill_nanos = self
            .last_refill_nanos
            .saturating_add(earned.saturating_mul(self.refill_interval_nanos));

        let added = self.tokens - before;
        trace!(earned, added, tokens = self.tokens, "refilled bucket");
        added
    }

    /// Consume one token. Returns `true` if a token was available.
    ///
    /// This is the only request-driven mutation; exclusive access per bucket
    /// is the caller's responsibility (the registry holds the map entry guard
    /// across refill and consume).
    pub fn consume(&mut self) -> bool {
        if self.tokens > 0 {
            self.tokens -= 1;
            true
        } else {
            false
        }
    }

    /// Immutable view of the bucket state for diagnostics.
    pub fn snapshot(&self) -> BucketSnapshot {
        BucketSnapshot {
            tokens: self.tokens,
            burst: self.burst,
            sustained: self.sustained,
            last_refill_nanos: self.last_refill_nanos,
        }
    }
}

/// Point-in-time copy of a bucket's state, for external introspection tooling.
/// Not usable to mutate the live bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketSnapshot {
    pub tokens: u64,
    pub burst: u64,
    pub sustained: u64,
    pub last_refill_nanos: u64,
}
