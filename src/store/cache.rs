//! Short-lived read cache
//!
//! Holds the most recent read for a fixed time-to-live so that one
//! rendering cycle does not fetch the sheet several times.
//!
//! - A TTL of zero disables caching
//! - Entries are replaced wholesale, never patched
//! - Any mutation of the sheet invalidates the entry

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<(Instant, T)>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Cached value if it is still fresh
    pub fn get(&self) -> Option<&T> {
        self.get_at(Instant::now())
    }

    pub fn get_at(&self, now: Instant) -> Option<&T> {
        match &self.entry {
            Some((stored_at, value)) if now.saturating_duration_since(*stored_at) < self.ttl => {
                Some(value)
            }
            _ => None,
        }
    }

    pub fn put(&mut self, value: T) {
        self.put_at(value, Instant::now());
    }

    pub fn put_at(&mut self, value: T, now: Instant) {
        if self.is_enabled() {
            self.entry = Some((now, value));
        }
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
