/*
[INPUT]:  Wall-clock time in milliseconds
[OUTPUT]: Strictly increasing nonces for signed requests
[POS]:    Auth layer - replay protection
[UPDATE]: When changing nonce resolution or sharing scope
*/

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Thread-safe nonce source.
///
/// Each value is `max(now_ms, previous + 1)`, so nonces stay strictly
/// increasing even when requests are signed faster than the clock ticks or
/// the clock steps backwards.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce, based on the current wall clock
    pub fn next(&self) -> u64 {
        self.next_at(now_millis())
    }

    fn next_at(&self, now: u64) -> u64 {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(current.saturating_add(1));
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }

    /// Last nonce handed out, zero if none yet
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::Acquire)
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}
