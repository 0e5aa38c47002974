//! Lifetime guard for view-level async work
//!
//! A view starts a request, then may be torn down before the response
//! arrives. Running the request through a [`ViewScope`] makes the late result
//! disappear instead of updating state nobody displays any more.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Shared liveness flag for one view
#[derive(Debug, Clone)]
pub struct ViewScope {
    live: Arc<AtomicBool>,
}

impl ViewScope {
    /// Create a live scope
    #[must_use]
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether the view is still shown
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Mark the view as gone; every clone observes it
    pub fn teardown(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Await `fut` and hand back its output only if the view is still live
    ///
    /// The future always runs to completion, so requests already sent are
    /// not cancelled half way.
    pub async fn run<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        let output = fut.await;
        if self.is_live() {
            Some(output)
        } else {
            debug!("Dropping result for a torn down view");
            None
        }
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}
