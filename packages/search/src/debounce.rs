//! Generation-counted debouncing.
//!
//! Every new input arms a fresh generation; a pending wait whose
//! generation is no longer current when the window elapses is abandoned.
//! The same generation check discards a stale in-flight fetch after it
//! returns.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// A debounce guard shared by all inputs of one interactive control.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Registers a new input and returns its generation.
    ///
    /// Arming implicitly supersedes every earlier generation.
    pub fn arm(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether the given generation is still the latest input.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Arms a new generation and waits out the quiet window.
    ///
    /// Returns the generation if no newer input arrived during the window,
    /// `None` if this input was superseded and its work should not fire.
    pub async fn settle(&self) -> Option<u64> {
        let generation = self.arm();
        tokio::time::sleep(self.window).await;
        self.is_current(generation).then_some(generation)
    }
}
