//! # Study Timer Core Library
//!
//! This library provides the core business logic for the Study Timer. All
//! behavior lives here; the `studytimer-cli` binary is a thin layer that
//! drives the store and prints its events.
//!
//! ## Architecture
//!
//! - **Store**: A wall-clock-based session state machine that requires the
//!   caller to periodically invoke `tick()` for elapsed-time updates
//! - **Reminders**: Interval-based break reminders delivered through a
//!   best-effort [`Notifier`]
//! - **Storage**: A key-value seam ([`KvStore`]) backed by SQLite or memory,
//!   plus TOML-based configuration
//!
//! ## Key Components
//!
//! - [`StudyStore`]: Timer, session history, subjects and settings
//! - [`Database`]: Durable key-value persistence
//! - [`Config`]: Application configuration management
//! - [`Clock`]: Wall clock and calendar collaborator

pub mod clock;
pub mod error;
pub mod events;
pub mod reminder;
pub mod session;
pub mod storage;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use events::Event;
pub use reminder::{MemoryNotifier, Notifier, NullNotifier, ReminderNotice, ReminderTrigger};
pub use session::{StudySession, Subject, UNCATEGORIZED};
pub use storage::{Config, Database, KvStore, MemoryKv};
pub use store::{format_hms, StudyStore, TimerState};
