//! The study timer store.
//!
//! A single owned state object holding the clock, the in-progress session,
//! the session history, the subject catalog and the reminder settings. Like
//! the rest of the crate it runs no threads of its own: the caller drives
//! `tick()` at whatever cadence it wants to display.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused -> Idle
//! ```
//!
//! Elapsed time is always derived from the wall-clock delta against a fixed
//! start instant, never accumulated tick by tick, so missed ticks cannot
//! make a session look shorter than it was.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = StudyStore::new(Database::open()?);
//! store.load_all()?;
//! store.start();
//! // In a loop:
//! store.tick();
//! // Later:
//! store.stop()?;
//! ```

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::{elapsed_secs_between, Clock, SystemClock};
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::reminder::{Notifier, NullNotifier, ReminderNotice, ReminderTrigger};
use crate::session::{new_id, StudySession, Subject, UNCATEGORIZED};
use crate::storage::{KvStore, REMINDER_INTERVAL_KEY, SESSIONS_KEY, SUBJECTS_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// No session in progress.
    Idle,
    Running,
    /// A session exists but its elapsed time is frozen.
    Paused,
}

/// Single owner of all study timer state.
pub struct StudyStore {
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
    kv: Box<dyn KvStore>,
    notice: ReminderNotice,
    uncategorized_label: String,

    is_running: bool,
    /// Present only while running.
    start_time: Option<DateTime<Utc>>,
    /// Frozen on pause, recomputed on every tick while running.
    elapsed_secs: u64,
    current_session: Option<StudySession>,
    sessions: Vec<StudySession>,
    subjects: Vec<Subject>,
    selected_subject: String,
    reminder: ReminderTrigger,
}

impl StudyStore {
    /// Create a store over the given durable store, using the system clock
    /// and no notifications. Nothing is loaded until a `load_*` call.
    pub fn new(kv: impl KvStore + 'static) -> Self {
        Self {
            clock: Box::new(SystemClock),
            notifier: Box::new(NullNotifier),
            kv: Box::new(kv),
            notice: ReminderNotice::default(),
            uncategorized_label: UNCATEGORIZED.to_string(),
            is_running: false,
            start_time: None,
            elapsed_secs: 0,
            current_session: None,
            sessions: Vec::new(),
            subjects: Vec::new(),
            selected_subject: String::new(),
            reminder: ReminderTrigger::default(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_notice(mut self, notice: ReminderNotice) -> Self {
        self.notice = notice;
        self
    }

    pub fn with_uncategorized_label(mut self, label: impl Into<String>) -> Self {
        self.uncategorized_label = label.into();
        self
    }

    /// In-memory interval used until `load_settings` finds a saved one.
    /// Does not write to the durable store.
    pub fn with_reminder_interval(mut self, interval_min: u32) -> Self {
        self.reminder.set_interval_min(interval_min);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.is_running {
            TimerState::Running
        } else if self.current_session.is_some() {
            TimerState::Paused
        } else {
            TimerState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Elapsed time as `HH:MM:SS`.
    pub fn formatted_time(&self) -> String {
        format_hms(self.elapsed_secs)
    }

    pub fn current_session(&self) -> Option<&StudySession> {
        self.current_session.as_ref()
    }

    pub fn sessions(&self) -> &[StudySession] {
        &self.sessions
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn selected_subject(&self) -> &str {
        &self.selected_subject
    }

    pub fn reminder_interval(&self) -> u32 {
        self.reminder.interval_min()
    }

    pub fn last_reminded_minute(&self) -> u64 {
        self.reminder.last_reminded_minute()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Finished sessions dated today.
    pub fn today_sessions(&self) -> Vec<&StudySession> {
        self.sessions_on(self.today())
    }

    /// Sum of today's session durations, in seconds.
    pub fn today_total_time(&self) -> u64 {
        self.total_on(self.today())
    }

    pub fn sessions_on(&self, date: NaiveDate) -> Vec<&StudySession> {
        self.sessions.iter().filter(|s| s.date == date).collect()
    }

    pub fn total_on(&self, date: NaiveDate) -> u64 {
        self.sessions
            .iter()
            .filter(|s| s.date == date)
            .map(|s| s.duration)
            .sum()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            elapsed_secs: self.elapsed_secs,
            formatted_time: self.formatted_time(),
            session_id: self.current_session.as_ref().map(|s| s.id.clone()),
            subject: self.current_session.as_ref().map(|s| s.subject.clone()),
            reminder_interval_min: self.reminder.interval_min(),
            today_total_secs: self.today_total_time(),
            at: self.clock.now(),
        }
    }

    // ── Clock & session commands ─────────────────────────────────────

    /// Begin a new session. Only effective from `Idle`.
    pub fn start(&mut self) -> Option<Event> {
        if self.state() != TimerState::Idle {
            debug!(state = ?self.state(), "start ignored");
            return None;
        }
        let now = self.clock.now();
        let subject = if self.selected_subject.is_empty() {
            self.uncategorized_label.clone()
        } else {
            self.selected_subject.clone()
        };
        let session = StudySession::new(new_id(now), now, self.clock.date_of(now), subject);

        self.is_running = true;
        self.start_time = Some(now);
        self.elapsed_secs = 0;
        self.reminder.rearm();
        debug!(session_id = %session.id, subject = %session.subject, "session started");

        let event = Event::SessionStarted {
            session_id: session.id.clone(),
            subject: session.subject.clone(),
            at: now,
        };
        self.current_session = Some(session);
        Some(event)
    }

    /// Freeze elapsed time. Only effective while running.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        let now = self.clock.now();
        self.is_running = false;
        if let Some(start) = self.start_time.take() {
            self.elapsed_secs = elapsed_secs_between(start, now);
        }
        Some(Event::TimerPaused {
            elapsed_secs: self.elapsed_secs,
            at: now,
        })
    }

    /// Continue a paused session from its frozen elapsed time.
    pub fn resume(&mut self) -> Option<Event> {
        if self.state() != TimerState::Paused {
            return None;
        }
        let now = self.clock.now();
        let elapsed = self.elapsed_secs.min(i64::MAX as u64 / 1000) as i64;
        self.start_time = Some(now - Duration::seconds(elapsed));
        self.is_running = true;
        Some(Event::TimerResumed {
            elapsed_secs: self.elapsed_secs,
            at: now,
        })
    }

    /// Finish the in-progress session, append it to the history and persist
    /// the history. Without a session this is just a pause.
    ///
    /// # Errors
    /// Returns an error if the history cannot be written. The session is
    /// still kept in memory and will be included in the next write.
    pub fn stop(&mut self) -> Result<Option<Event>> {
        self.pause();
        let Some(mut session) = self.current_session.take() else {
            return Ok(None);
        };
        let now = self.clock.now();
        session.end_time = Some(now);
        session.duration = self.elapsed_secs;

        let event = Event::SessionCompleted {
            session_id: session.id.clone(),
            subject: session.subject.clone(),
            duration_secs: session.duration,
            at: now,
        };
        info!(
            session_id = %session.id,
            subject = %session.subject,
            duration_secs = session.duration,
            "session completed"
        );
        self.sessions.push(session);
        self.clear_clock();
        self.save_sessions()?;
        Ok(Some(event))
    }

    /// Discard any in-progress session. The history is untouched.
    pub fn reset(&mut self) -> Option<Event> {
        self.clear_clock();
        Some(Event::TimerReset {
            at: self.clock.now(),
        })
    }

    /// Recompute elapsed time while running and fire a reminder when a new
    /// interval multiple is reached.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        let start = self.start_time?;
        let now = self.clock.now();
        self.elapsed_secs = elapsed_secs_between(start, now);

        let minute_mark = self.reminder.check(self.elapsed_secs)?;
        let delivered = self.send_reminder();
        Some(Event::ReminderDue {
            minute_mark,
            delivered,
            at: now,
        })
    }

    /// Overwrite the in-progress session's notes. Returns false when there
    /// is no session to write to.
    pub fn record_content(&mut self, content: impl Into<String>) -> bool {
        match self.current_session.as_mut() {
            Some(session) => {
                session.content = content.into();
                true
            }
            None => false,
        }
    }

    // ── Subject commands ─────────────────────────────────────────────

    /// # Errors
    /// Returns an error if the subject list cannot be written.
    pub fn add_subject(&mut self, name: impl Into<String>) -> Result<Event> {
        let now = self.clock.now();
        let subject = Subject {
            id: new_id(now),
            name: name.into(),
        };
        let event = Event::SubjectAdded {
            subject_id: subject.id.clone(),
            name: subject.name.clone(),
            at: now,
        };
        self.subjects.push(subject);
        self.save_subjects()?;
        Ok(event)
    }

    /// Remove a subject by id. The list is written even when nothing matched.
    ///
    /// # Errors
    /// Returns an error if the subject list cannot be written.
    pub fn remove_subject(&mut self, id: &str) -> Result<Option<Event>> {
        let before = self.subjects.len();
        self.subjects.retain(|s| s.id != id);
        let removed = self.subjects.len() != before;
        self.save_subjects()?;
        Ok(removed.then(|| Event::SubjectRemoved {
            subject_id: id.to_string(),
            at: self.clock.now(),
        }))
    }

    /// Rename a subject. Past sessions keep the label they were started with.
    ///
    /// # Errors
    /// Returns an error if the subject list cannot be written.
    pub fn update_subject(&mut self, id: &str, name: impl Into<String>) -> Result<Option<Event>> {
        let Some(subject) = self.subjects.iter_mut().find(|s| s.id == id) else {
            debug!(subject_id = id, "update ignored, no such subject");
            return Ok(None);
        };
        subject.name = name.into();
        let event = Event::SubjectRenamed {
            subject_id: subject.id.clone(),
            name: subject.name.clone(),
            at: self.clock.now(),
        };
        self.save_subjects()?;
        Ok(Some(event))
    }

    /// Label copied into sessions started from now on.
    pub fn select_subject(&mut self, name: impl Into<String>) {
        self.selected_subject = name.into();
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// # Errors
    /// Returns an error if the interval cannot be written.
    pub fn set_reminder_interval(&mut self, interval_min: u32) -> Result<()> {
        self.reminder.set_interval_min(interval_min);
        self.kv
            .set(REMINDER_INTERVAL_KEY, &interval_min.to_string())?;
        Ok(())
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Load the session history. Absent data leaves the history untouched.
    ///
    /// # Errors
    /// Returns an error if the store fails or the stored history is malformed.
    pub fn load_sessions(&mut self) -> Result<()> {
        if let Some(raw) = self.read(SESSIONS_KEY)? {
            self.sessions = serde_json::from_str(&raw)?;
            debug!(count = self.sessions.len(), "loaded sessions");
        }
        Ok(())
    }

    /// Load the subject list. On first run an empty list is written so the
    /// key exists from then on.
    ///
    /// # Errors
    /// Returns an error if the store fails or the stored list is malformed.
    pub fn load_subjects(&mut self) -> Result<()> {
        match self.read(SUBJECTS_KEY)? {
            Some(raw) => {
                self.subjects = serde_json::from_str(&raw)?;
                debug!(count = self.subjects.len(), "loaded subjects");
            }
            None => {
                self.subjects = Vec::new();
                self.save_subjects()?;
            }
        }
        Ok(())
    }

    /// Load the reminder interval. Absent data keeps the current interval.
    ///
    /// # Errors
    /// Returns an error if the store fails or the stored value is not a
    /// whole number of minutes.
    pub fn load_settings(&mut self) -> Result<()> {
        if let Some(raw) = self.read(REMINDER_INTERVAL_KEY)? {
            let interval = raw.trim().parse::<u32>().map_err(|e| {
                ValidationError::MalformedStoredValue {
                    key: REMINDER_INTERVAL_KEY.to_string(),
                    message: e.to_string(),
                }
            })?;
            self.reminder.set_interval_min(interval);
        }
        Ok(())
    }

    /// Load settings, subjects and sessions.
    ///
    /// # Errors
    /// Returns the first load error encountered.
    pub fn load_all(&mut self) -> Result<()> {
        self.load_settings()?;
        self.load_subjects()?;
        self.load_sessions()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn clear_clock(&mut self) {
        self.is_running = false;
        self.start_time = None;
        self.elapsed_secs = 0;
        self.current_session = None;
        self.reminder.rearm();
    }

    fn send_reminder(&self) -> bool {
        if !self.notifier.is_available() {
            debug!("notifications unavailable, reminder skipped");
            return false;
        }
        self.notifier.show(&self.notice.title, &self.notice.body);
        info!(elapsed_secs = self.elapsed_secs, "break reminder sent");
        true
    }

    /// Stored value for `key`, with empty strings treated as absent.
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.kv.get(key)?.filter(|raw| !raw.is_empty()))
    }

    fn save_sessions(&self) -> Result<()> {
        let json = serde_json::to_string(&self.sessions)?;
        self.kv.set(SESSIONS_KEY, &json)?;
        Ok(())
    }

    fn save_subjects(&self) -> Result<()> {
        let json = serde_json::to_string(&self.subjects)?;
        self.kv.set(SUBJECTS_KEY, &json)?;
        Ok(())
    }
}

/// Format seconds as zero-padded `HH:MM:SS`. Hours grow past two digits.
pub fn format_hms(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
