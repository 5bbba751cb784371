//! Evaluation request generations.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter tagging evaluation requests.
///
/// Each edit claims the next generation via `next()`; the reconciler
/// compares a response's tag against `latest()` and drops anything that
/// has been superseded in the meantime. An edit issued while an older
/// evaluation is still pending therefore always wins.
#[derive(Debug, Default)]
pub struct GenerationCounter(AtomicU64);

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next generation id.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Most recently issued generation (0 before the first request).
    pub fn latest(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}
