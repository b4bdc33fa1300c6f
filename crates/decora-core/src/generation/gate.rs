//! Bounded-concurrency gate for the diffusion pipeline.
//!
//! Diffusion pipelines are generally not reentrant-safe: concurrent
//! invocations against a single instance corrupt each other or exhaust the
//! device. The gate bounds in-flight generations to the pipeline's real
//! limit (default 1) and queues the rest.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Semaphore-backed admission gate for diffusion calls.
///
/// Cloning shares the same permit pool.
#[derive(Clone)]
pub struct GenerationGate {
    permits: Arc<Semaphore>,
}

impl GenerationGate {
    /// Create a gate admitting at most `max_concurrency` concurrent
    /// generations. Zero is clamped to one so the gate can never deadlock
    /// every caller.
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    /// Acquire a permit, waiting until one is free.
    ///
    /// The permit must be held across the whole generation call and is
    /// released on drop.
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        // The semaphore is owned by the gate and never closed.
        self.permits
            .clone()
            .acquire_owned()
            .await
            .expect("generation gate semaphore is never closed")
    }

    /// Permits currently available (used by tests and status reporting).
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}
