//! Study sessions and subjects.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::{NoContext, Timestamp, Uuid};

/// Label given to sessions started with no subject selected.
pub const UNCATEGORIZED: &str = "uncategorized";

/// One contiguous timed interval of study.
///
/// Once appended to the history only `content` was ever writable, and only
/// while the session was still in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Elapsed seconds. Zero until the session is stopped.
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub content: String,
    /// Calendar date the session started on, fixed at creation.
    pub date: NaiveDate,
    pub subject: String,
}

impl StudySession {
    pub fn new(id: String, start_time: DateTime<Utc>, date: NaiveDate, subject: String) -> Self {
        Self {
            id,
            start_time,
            end_time: None,
            duration: 0,
            content: String::new(),
            date,
            subject,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}

/// A user-defined label for categorizing sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
}

/// Mint a time-ordered identifier for the given instant.
///
/// UUIDv7 carries the millisecond timestamp plus random bits, so two ids
/// minted within the same millisecond still differ.
pub fn new_id(at: DateTime<Utc>) -> String {
    let secs = at.timestamp().max(0) as u64;
    let nanos = at.timestamp_subsec_nanos();
    Uuid::new_v7(Timestamp::from_unix(NoContext, secs, nanos)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_minted_in_same_millisecond_differ() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let a = new_id(at);
        let b = new_id(at);
        assert_ne!(a, b);
    }

    #[test]
    fn session_serializes_with_camel_case_fields() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let session = StudySession::new(
            "s1".into(),
            at,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            "Math".into(),
        );
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["startTime"], "2024-05-01T08:00:00Z");
        assert_eq!(json["endTime"], serde_json::Value::Null);
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["duration"], 0);
    }

    #[test]
    fn session_loads_with_millisecond_timestamps() {
        let json = r#"{
            "id": "1714550400000",
            "startTime": "2024-05-01T08:00:00.000Z",
            "endTime": "2024-05-01T08:25:00.000Z",
            "duration": 1500,
            "content": "chapter 3",
            "date": "2024-05-01",
            "subject": "Physics"
        }"#;
        let session: StudySession = serde_json::from_str(json).unwrap();
        assert!(session.is_finished());
        assert_eq!(session.duration, 1500);
        assert_eq!(session.id, "1714550400000");
    }
}
