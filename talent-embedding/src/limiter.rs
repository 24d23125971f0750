//! Request limiter for model calls
//!
//! Bounds the number of in-flight requests and, optionally, spaces request
//! starts so a burst of candidate embeddings does not trip provider-side rate
//! limits.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use tokio::sync::{Mutex, Semaphore, SemaphorePermit};
use tokio::time::Instant;
use tracing::debug;

use crate::error::{EmbeddingError, Result};

/// Concurrency + spacing limiter shared by every call a gateway makes
///
/// Spacing uses reservation-based scheduling: a caller reserves the next free
/// slot while holding the lock, then sleeps outside it, so concurrent callers
/// never pick the same slot.
#[derive(Debug)]
pub struct RequestLimiter {
    permits: Semaphore,
    max_in_flight: usize,
    /// Earliest instant the next request may start
    next_slot: Mutex<Option<Instant>>,
    min_interval: Duration,
    name: String,
    total_requests: AtomicU64,
    waited_requests: AtomicU64,
}

impl RequestLimiter {
    pub fn new(max_in_flight: usize, min_interval: Duration, name: &str) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self {
            permits: Semaphore::new(max_in_flight),
            max_in_flight,
            next_slot: Mutex::new(None),
            min_interval,
            name: name.to_string(),
            total_requests: AtomicU64::new(0),
            waited_requests: AtomicU64::new(0),
        }
    }

    /// Wait for a free request slot
    ///
    /// The returned permit must be held for the duration of the request.
    pub async fn acquire(&self) -> Result<SemaphorePermit<'_>> {
        let request_num = self.total_requests.fetch_add(1, Ordering::Relaxed) + 1;

        let permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| EmbeddingError::LimiterClosed)?;

        if self.min_interval.is_zero() {
            return Ok(permit);
        }

        let wait_until = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            match *next_slot {
                Some(slot) if slot > now => {
                    *next_slot = Some(slot + self.min_interval);
                    Some(slot)
                }
                _ => {
                    *next_slot = Some(now + self.min_interval);
                    None
                }
            }
        };

        if let Some(slot) = wait_until {
            self.waited_requests.fetch_add(1, Ordering::Relaxed);
            debug!(
                "[LIMITER:{}] #{} waiting {:?} for its slot",
                self.name,
                request_num,
                slot.saturating_duration_since(Instant::now())
            );
            tokio::time::sleep_until(slot).await;
        }

        Ok(permit)
    }

    /// Requests that could start right now without waiting for a permit
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn stats(&self) -> LimiterStats {
        LimiterStats {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            waited_requests: self.waited_requests.load(Ordering::Relaxed),
            max_in_flight: self.max_in_flight,
            min_interval_ms: self.min_interval.as_millis() as u64,
            name: self.name.clone(),
        }
    }
}

/// Statistics about limiter usage
#[derive(Debug, Clone)]
pub struct LimiterStats {
    pub total_requests: u64,
    pub waited_requests: u64,
    pub max_in_flight: usize,
    pub min_interval_ms: u64,
    pub name: String,
}
