use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::TimerState;

/// Every effective state change in the store produces an Event.
/// Commands that are absorbed as no-ops produce none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        session_id: String,
        subject: String,
        at: DateTime<Utc>,
    },
    TimerPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        session_id: String,
        subject: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A reminder minute mark was reached. `delivered` is false when the
    /// notifier was unavailable and the notification was skipped.
    ReminderDue {
        minute_mark: u64,
        delivered: bool,
        at: DateTime<Utc>,
    },
    SubjectAdded {
        subject_id: String,
        name: String,
        at: DateTime<Utc>,
    },
    SubjectRemoved {
        subject_id: String,
        at: DateTime<Utc>,
    },
    SubjectRenamed {
        subject_id: String,
        name: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        elapsed_secs: u64,
        formatted_time: String,
        session_id: Option<String>,
        subject: Option<String>,
        reminder_interval_min: u32,
        today_total_secs: u64,
        at: DateTime<Utc>,
    },
}
