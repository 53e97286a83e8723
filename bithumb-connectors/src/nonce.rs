//! Request nonces.
//!
//! Bithumb rejects a nonce that is not greater than the last one it saw for
//! the key pair. Nonces are millisecond timestamps, bumped past the previous
//! value when two requests land in the same millisecond or the clock steps back.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Strictly increasing millisecond nonce source.
#[derive(Debug, Default)]
pub struct NonceSource {
    last: AtomicU64,
}

impl NonceSource {
    /// Create a fresh source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce, string-encoded for the `Api-Nonce` header.
    pub fn next(&self) -> String {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_at(now_ms).to_string()
    }

    /// Next nonce given the current clock reading.
    fn next_at(&self, now_ms: u64) -> u64 {
        let mut prev = self.last.load(Ordering::Acquire);
        loop {
            let candidate = now_ms.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}
