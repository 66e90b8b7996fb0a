//! One-way cancellation flag shared by the controlling task and the probes

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation token. Starts unset, once set it stays set.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that remaining work stop at its next checkpoint
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}
