mod config;
pub mod database;
pub mod memory;

pub use config::{Config, NotificationsConfig, ReminderConfig, SessionsConfig};
pub use database::Database;
pub use memory::MemoryKv;

use std::path::PathBuf;

use crate::error::StorageError;

/// Key holding the serialized session history.
pub const SESSIONS_KEY: &str = "studySessions";
/// Key holding the serialized subject list.
pub const SUBJECTS_KEY: &str = "studySubjects";
/// Key holding the reminder interval in minutes.
pub const REMINDER_INTERVAL_KEY: &str = "reminderInterval";

/// Durable key-value string store.
///
/// Writes fully overwrite the previous value; the last write wins.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Returns `~/.config/studytimer[-dev]/` based on STUDYTIMER_ENV.
///
/// Set STUDYTIMER_ENV=dev to use development data directory.
/// STUDYTIMER_DATA_DIR, when set, is used as-is.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("STUDYTIMER_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STUDYTIMER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studytimer-dev")
            } else {
                base_dir.join("studytimer")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
