//! Wall clock and calendar collaborator.
//!
//! The store never reads the system time directly. Everything time-related
//! goes through a [`Clock`] so elapsed-time arithmetic and "today" grouping
//! can be driven deterministically in tests.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

/// Source of the current instant and of calendar dates.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date an instant falls on. Local time by default.
    fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&Local).date_naive()
    }

    /// Today's calendar date.
    fn today(&self) -> NaiveDate {
        self.date_of(self.now())
    }
}

/// The host's real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually advanced clock.
///
/// Clones share the same instant, so a test can keep one handle while the
/// store owns another. Dates are derived in UTC to stay independent of the
/// host time zone.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.now.set(instant);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.now.set(self.now.get() + Duration::seconds(secs));
    }

    pub fn advance_millis(&self, millis: i64) {
        self.now.set(self.now.get() + Duration::milliseconds(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.date_naive()
    }
}

/// Whole seconds from `from` to `to`, floored. Zero if the clock went backwards.
pub fn elapsed_secs_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    let millis = (to - from).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis / 1000) as u64
    }
}
