//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and the behaviour suites in `tests/`.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    pub fn new(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }

    /// The frozen instant.
    pub fn now(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}
