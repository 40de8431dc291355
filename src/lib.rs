// src/lib.rs

//! # Gatelimit
//!
//! A per-route request-admission layer based on the token bucket algorithm.
//!
//! Each registered route gets a bucket holding up to `burst` tokens that
//! replenishes at a `sustained` rate (tokens per minute). Admitting a request
//! consumes one token; an empty bucket rejects until enough wall-clock time
//! has elapsed. Refill happens both eagerly on every admission attempt and
//! periodically in the background, so capacity reflects elapsed time even
//! across idle gaps.
//!
//! ## Quick Example
//!
//! ```rust
//! use std::sync::Arc;
//! use gatelimit::{AdmissionConfig, AdmissionGate, BucketRegistry, Clock, SystemClock};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AdmissionConfig::new().route("GET /user/:id", 10, 6);
//! let clock = SystemClock;
//! let registry = Arc::new(BucketRegistry::from_config(&config, clock.now()?)?);
//! let gate = AdmissionGate::with_registry(Arc::clone(&registry), clock);
//!
//! let decision = gate.admit("GET /user/:id")?;
//! assert!(decision.admitted);
//! println!("{} tokens remaining", decision.tokens_remaining);
//! # Ok(())
//! # }
//! ```

// private modules
mod bucket;
mod clock;
mod config;
mod errors;
mod gate;
mod registry;
mod scheduler;

// public API exports
pub use bucket::{BucketSnapshot, TokenBucket};
pub use clock::{Clock, ClockError, SystemClock};
pub use config::{AdmissionConfig, RouteLimit};
pub use errors::AdmissionError;
pub use gate::{AdmissionGate, AdmitDecision, DecisionReason};
pub use registry::BucketRegistry;
pub use scheduler::RefillScheduler;
