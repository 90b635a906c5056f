//! Monotonic server clock for write timestamps.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Issues strictly increasing timestamps, one per server-timestamp
/// resolution. The wall clock is advanced by at least one microsecond per
/// call so concurrent appends never share a timestamp.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last_micros: AtomicI64,
}

impl MonotonicClock {
    /// Create a clock starting from the current wall time.
    pub fn new() -> Self {
        Self::default()
    }

    /// The next timestamp, strictly greater than every previous one.
    pub fn next(&self) -> DateTime<Utc> {
        let now = Utc::now().timestamp_micros();
        let mut prev = self.last_micros.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(prev + 1);
            match self.last_micros.compare_exchange(
                prev,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => {
                    return DateTime::from_timestamp_micros(candidate).unwrap_or_else(Utc::now);
                }
                Err(actual) => prev = actual,
            }
        }
    }
}
