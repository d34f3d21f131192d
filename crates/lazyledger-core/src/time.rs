use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Clock abstracts access to the current timestamp so the engine remains
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock implementation backed by system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock for tests and hosts that replay time. Cloned handles
/// share the same instant, so a test can keep one handle and hand another
/// to the ledger.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Arc::new(Mutex::new(instant)),
        }
    }

    /// Moves the clock to an absolute instant; backwards moves are allowed.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.lock().expect("clock lock poisoned") = instant;
    }

    /// Advances the clock by a relative duration.
    pub fn advance(&self, delta: Duration) {
        let mut instant = self.instant.lock().expect("clock lock poisoned");
        *instant += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.lock().expect("clock lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_handles_share_one_instant() {
        let start = Utc::now();
        let clock = FixedClock::new(start);
        let handle = clock.clone();
        handle.advance(Duration::hours(2));
        assert_eq!(clock.now(), start + Duration::hours(2));
        handle.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn today_tracks_the_clock_date() {
        let instant = "2025-08-07T23:30:00Z".parse().unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.today(), instant.date_naive());
    }
}
