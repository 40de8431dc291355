// src/gate.rs

//! Per-request admission decisions against the bucket registry.

// dependencies
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::errors::AdmissionError;
use crate::registry::BucketRegistry;

/// Answers one question per incoming request: admit or reject.
/// C is the clock type, defaulting to SystemClock.
///
/// The gate refills the route's bucket from the current clock reading before
/// consuming, so a decision is correct even if the background scheduler is
/// delayed or not running at all.
#[derive(Debug)]
pub struct AdmissionGate<C = SystemClock>
where
    C: Clock,
{
    registry: Arc<BucketRegistry>,
    clock: C,
}

// methods for the AdmissionGate type
impl<C> AdmissionGate<C>
where
    C: Clock,
{
    /// Create a gate over a shared registry
    pub fn with_registry(registry: Arc<BucketRegistry>, clock: C) -> Self {
        Self { registry, clock }
    }

    /// The shared registry this gate decides against
    pub fn registry(&self) -> &Arc<BucketRegistry> {
        &self.registry
    }

    /// Decide whether to admit one request for the given route key.
    ///
    /// An unknown route and an exhausted bucket are both decisions, not
    /// errors; the only failure here is an unreadable clock. Refill and
    /// consume run atomically with respect to concurrent callers on the same
    /// route, so two racing requests can never both win the last token.
    pub fn admit(&self, route: &str) -> Result<AdmitDecision, AdmissionError> {
        let now = self.clock.now()?;

        match self.registry.refill_then_consume(route, now) {
            None => Ok(AdmitDecision {
                admitted: false,
                tokens_remaining: 0,
                reason: DecisionReason::RouteNotFound,
            }),
            Some((true, tokens_remaining)) => Ok(AdmitDecision {
                admitted: true,
                tokens_remaining,
                reason: DecisionReason::Ok,
            }),
            Some((false, _)) => Ok(AdmitDecision {
                admitted: false,
                tokens_remaining: 0,
                reason: DecisionReason::RateLimited,
            }),
        }
    }
}

/// Result of an admission decision, with the metadata a routing layer needs
/// to build its response (e.g. a 429 with remaining-capacity headers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmitDecision {
    /// Whether the request should be admitted
    pub admitted: bool,
    /// Tokens left in the route's bucket after this decision
    pub tokens_remaining: u64,
    /// Why the request was admitted or rejected
    pub reason: DecisionReason,
}

/// Classification of an admission outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// A token was available and consumed
    Ok,
    /// The route's bucket is exhausted; admissible again once enough
    /// wall-clock time has elapsed
    RateLimited,
    /// No bucket is registered for the route key
    RouteNotFound,
}
