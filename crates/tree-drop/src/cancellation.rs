//! Cooperative cancellation signal supplied by the host.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cancellation flag shared between the host and a running drop.
///
/// The drop polls it at its suspension points; it never subscribes to it.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancellation_requested(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
