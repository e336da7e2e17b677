//! Request pacing for restore
//!
//! One [`Throttle`] is shared by every in-flight task of a restore, so the
//! configured rate bounds the total call rate against the pool no matter how
//! many records are being replayed concurrently.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Admission control for outgoing service calls
#[async_trait]
pub trait Throttle: Send + Sync {
    /// Waits until one more call may be issued
    async fn acquire(&self);
}

/// Spaces successive acquisitions at least `min_interval` apart
///
/// The first acquisition passes immediately.
#[derive(Debug)]
pub struct IntervalThrottle {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl IntervalThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Throttle for IntervalThrottle {
    async fn acquire(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        // Reserve a slot under the lock, then sleep outside it so waiters
        // queue on distinct slots.
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(at) if at > now => at,
                _ => now,
            };
            *next = Some(slot + self.min_interval);
            slot
        };

        tokio::time::sleep_until(slot).await;
    }
}

/// Never waits
#[derive(Debug, Default, Clone, Copy)]
pub struct NoThrottle;

#[async_trait]
impl Throttle for NoThrottle {
    async fn acquire(&self) {}
}
