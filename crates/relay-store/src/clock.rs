//! # Clock Seam
//!
//! The store consumes a current-timestamp source rather than calling
//! `Utc::now()` inline. Production uses [`SystemClock`]; tests pin time
//! to make ledger ordering and overdue checks deterministic.

use chrono::{DateTime, Utc};

/// Source of "now" for timestamps and overdue classification.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
