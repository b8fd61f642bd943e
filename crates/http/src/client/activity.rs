//! In-flight request tracking for the console's busy indicator

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Header that keeps a request out of the activity count.
/// It is stripped before the request leaves the client.
pub const SKIP_INTERCEPTOR_HEADER: &str = "Skip-Interceptor";

/// Shared counter of requests currently in flight
#[derive(Clone, Debug, Default)]
pub struct ActivityTracker {
    in_flight: Arc<AtomicUsize>,
}

impl ActivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a request as started; it stays counted until the guard drops
    pub fn begin(&self) -> ActivityGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        ActivityGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }
}

/// Keeps one request counted while alive
#[derive(Debug)]
pub struct ActivityGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
