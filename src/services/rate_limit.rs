//! Per-user sliding-window request admission.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

/// Sliding-window rate limiter keyed by user id.
///
/// Each admission check prunes the user's window of expired timestamps,
/// rejects without recording when the window is full, and records the
/// current instant otherwise. Entries for idle users are never evicted;
/// the key space is bounded by the distinct users actually seen.
///
/// The instance is owned by whoever constructs it and shared by
/// reference; there is no module-level singleton. Concurrent checks for
/// the same user serialize on the map lock.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    windows: Mutex<HashMap<u64, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Admit or reject a request for `user_id`, recording it if admitted.
    pub async fn allow(&self, user_id: u64) -> bool {
        self.allow_at(user_id, Instant::now()).await
    }

    async fn allow_at(&self, user_id: u64, now: Instant) -> bool {
        let mut windows = self.windows.lock().await;
        let timestamps = windows.entry(user_id).or_default();

        timestamps.retain(|&t| now.duration_since(t) < self.window);

        if timestamps.len() >= self.max_requests {
            debug!(user_id, "rate limit hit ({} in window)", timestamps.len());
            return false;
        }

        timestamps.push(now);
        true
    }
}
