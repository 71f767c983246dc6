//! Simulated payment processing.
//!
//! There is no real payment provider; a charge is a fixed-duration delay
//! followed by an approval. The delay is cancellable: when the flow that
//! started it goes away (UI dismissed, navigation), the completion must
//! not apply its effects. `CancelGuard` ties cancellation to drop for
//! exactly that case.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

/// Outcome of a simulated charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Approved,
    Cancelled,
}

/// A single simulated charge with a fixed processing delay.
#[derive(Clone)]
pub struct SimulatedPayment {
    delay: Duration,
    cancelled: Arc<AtomicBool>,
}

impl SimulatedPayment {
    /// Create a charge with the given processing delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Cancel the charge. A cancelled charge never approves.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// A guard that cancels the charge when dropped, unless disarmed.
    pub fn cancel_guard(&self) -> CancelGuard {
        CancelGuard {
            cancelled: Arc::clone(&self.cancelled),
            armed: true,
        }
    }

    /// Run the processing delay, then report the outcome. Cancellation is
    /// checked only after the full delay; effects belong to the caller and
    /// must only be applied on [`PaymentStatus::Approved`].
    pub async fn process(&self) -> PaymentStatus {
        sleep(self.delay).await;
        if self.is_cancelled() {
            PaymentStatus::Cancelled
        } else {
            PaymentStatus::Approved
        }
    }
}

/// Cancels the associated charge on drop.
pub struct CancelGuard {
    cancelled: Arc<AtomicBool>,
    armed: bool,
}

impl CancelGuard {
    /// Consume the guard without cancelling (the flow completed normally).
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if self.armed {
            self.cancelled.store(true, Ordering::SeqCst);
        }
    }
}
