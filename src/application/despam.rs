use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

/// Default suppression window for repeated alert messages
pub const DEFAULT_DESPAM_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy)]
struct Entry {
    last_emitted: Instant,
    suppressed: u64,
}

/// Per-key log rate limiter.
///
/// The first message for a key passes, repeats inside `interval` are dropped
/// and counted, and the next message after the window passes again carrying
/// the dropped count.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    interval: Duration,
    entries: HashMap<String, Entry>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            entries: HashMap::new(),
        }
    }

    pub fn check(&mut self, key: &str) -> Option<u64> {
        self.check_at(key, Instant::now())
    }

    /// Returns `Some(dropped)` when a message for `key` may be emitted at
    /// `now`, `None` when it must be suppressed.
    pub fn check_at(&mut self, key: &str, now: Instant) -> Option<u64> {
        match self.entries.get_mut(key) {
            Some(entry) if now.saturating_duration_since(entry.last_emitted) < self.interval => {
                entry.suppressed += 1;
                None
            }
            Some(entry) => {
                let dropped = entry.suppressed;
                entry.last_emitted = now;
                entry.suppressed = 0;
                Some(dropped)
            }
            None => {
                self.entries.insert(
                    key.to_string(),
                    Entry {
                        last_emitted: now,
                        suppressed: 0,
                    },
                );
                Some(0)
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_DESPAM_INTERVAL)
    }
}
