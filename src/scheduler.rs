// src/scheduler.rs

//! Background periodic refill driver.

// dependencies
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::warn;

use crate::clock::Clock;
use crate::registry::BucketRegistry;

/// Periodic driver that refills every bucket on a fixed cadence, independent
/// of request traffic, so capacity accrues during idle periods rather than
/// relying on request-time refill alone. Refill is idempotent and monotonic,
/// which makes running both this and the gate's eager refill safe.
///
/// The worker stops when [`stop`](RefillScheduler::stop) is called or the
/// scheduler is dropped.
///
/// ```rust
/// use std::sync::Arc;
/// use std::time::Duration;
/// use gatelimit::{AdmissionConfig, BucketRegistry, RefillScheduler, SystemClock};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AdmissionConfig::new().route("GET /user/:id", 10, 6);
/// let registry = Arc::new(BucketRegistry::from_config(&config, 0)?);
///
/// let mut scheduler =
///     RefillScheduler::spawn(Arc::clone(&registry), SystemClock, Duration::from_millis(10));
/// scheduler.stop();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RefillScheduler {
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

// methods for the RefillScheduler type
impl RefillScheduler {
    /// Default refill cadence: twice a second.
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(500);

    /// Start the background worker thread.
    ///
    /// Each tick reads the clock once and applies `refill_all`. A clock
    /// failure skips the tick with a warning; the next tick retries.
    pub fn spawn<C>(registry: Arc<BucketRegistry>, clock: C, period: Duration) -> Self
    where
        C: Clock + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let worker = thread::spawn(move || {
            loop {
                thread::sleep(period);
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                match clock.now() {
                    Ok(now) => registry.refill_all(now),
                    Err(err) => warn!(%err, "clock read failed; skipping refill tick"),
                }
            }
        });

        Self {
            shutdown,
            worker: Some(worker),
        }
    }

    /// Signal the worker to stop and wait for it to exit. Idempotent.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for RefillScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
