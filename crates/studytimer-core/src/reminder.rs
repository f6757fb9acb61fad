//! Break reminders.
//!
//! The threshold check is pure: [`ReminderTrigger::check`] looks at elapsed
//! seconds and decides whether a new minute mark has been reached. Delivery
//! goes through a [`Notifier`], which is best-effort and may be absent.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Default reminder interval in minutes.
pub const DEFAULT_REMINDER_INTERVAL_MIN: u32 = 60;

/// Per-run reminder bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTrigger {
    interval_min: u32,
    last_reminded_minute: u64,
}

impl Default for ReminderTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_REMINDER_INTERVAL_MIN)
    }
}

impl ReminderTrigger {
    pub fn new(interval_min: u32) -> Self {
        Self {
            interval_min,
            last_reminded_minute: 0,
        }
    }

    pub fn interval_min(&self) -> u32 {
        self.interval_min
    }

    pub fn set_interval_min(&mut self, interval_min: u32) {
        self.interval_min = interval_min;
    }

    pub fn last_reminded_minute(&self) -> u64 {
        self.last_reminded_minute
    }

    /// Forget the last minute mark. Called when a new run begins.
    pub fn rearm(&mut self) {
        self.last_reminded_minute = 0;
    }

    /// Returns the minute mark to remind at, if `elapsed_secs` sits on a
    /// multiple of the interval that has not fired yet. An interval of zero
    /// disables reminders.
    pub fn check(&mut self, elapsed_secs: u64) -> Option<u64> {
        let minutes = elapsed_secs / 60;
        if minutes == 0 || self.interval_min == 0 {
            return None;
        }
        if minutes % u64::from(self.interval_min) != 0 || minutes == self.last_reminded_minute {
            return None;
        }
        self.last_reminded_minute = minutes;
        Some(minutes)
    }
}

/// Title and body shown when a reminder fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderNotice {
    pub title: String,
    pub body: String,
}

impl Default for ReminderNotice {
    fn default() -> Self {
        Self {
            title: "Break reminder".into(),
            body: "You have been studying for a while. Consider taking a break!".into(),
        }
    }
}

/// Best-effort notification facility.
pub trait Notifier {
    /// Whether notifications can be shown and the user permitted them.
    fn is_available(&self) -> bool;

    /// Display a notification. Failures are swallowed by the implementation.
    fn show(&self, title: &str, body: &str);
}

/// A notifier with no delivery capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn is_available(&self) -> bool {
        false
    }

    fn show(&self, _title: &str, _body: &str) {}
}

/// Records delivered notifications in memory.
///
/// Clones share the same log and permission flag.
#[derive(Debug, Clone)]
pub struct MemoryNotifier {
    permitted: Rc<Cell<bool>>,
    delivered: Rc<RefCell<Vec<ReminderNotice>>>,
}

impl Default for MemoryNotifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MemoryNotifier {
    pub fn new(permitted: bool) -> Self {
        Self {
            permitted: Rc::new(Cell::new(permitted)),
            delivered: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn set_permitted(&self, permitted: bool) {
        self.permitted.set(permitted);
    }

    pub fn delivered(&self) -> Vec<ReminderNotice> {
        self.delivered.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.delivered.borrow().len()
    }
}

impl Notifier for MemoryNotifier {
    fn is_available(&self) -> bool {
        self.permitted.get()
    }

    fn show(&self, title: &str, body: &str) {
        self.delivered.borrow_mut().push(ReminderNotice {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}
