//! The lifecycle context shared with every handler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// Cancellation signal shared by reference across the startup,
/// content-ready, and close-request handlers.
///
/// Cancellation is monotonic: the first [`cancel_once`] wins, every
/// later call is a no-op, and a cancelled context never reverts.
///
/// [`cancel_once`]: LifecycleContext::cancel_once
#[derive(Debug, Clone, Default)]
pub struct LifecycleContext {
    cancel: CancellationToken,
    closed: Arc<AtomicBool>,
}

impl LifecycleContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait until the context is cancelled.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    /// Cancel the context. Returns `true` for the one caller that
    /// actually performed the cancellation.
    pub fn cancel_once(&self) -> bool {
        if self
            .closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.cancel.cancel();
            true
        } else {
            false
        }
    }

    /// A token background work can hold to observe cancellation.
    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}
