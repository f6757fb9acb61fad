//! Shared helpers for CLI commands.

use serde::Serialize;
use studytimer_core::{Config, Database, StudyStore};

use crate::notify::DesktopNotifier;

/// Open the on-disk store with config-driven collaborators and load it.
pub fn open_store(config: &Config) -> Result<StudyStore, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut store = StudyStore::new(db)
        .with_notifier(DesktopNotifier::new(config.notifications.enabled))
        .with_notice(config.notice())
        .with_uncategorized_label(config.sessions.uncategorized_label.clone())
        .with_reminder_interval(config.reminder.default_interval_min);
    store.load_all()?;
    Ok(store)
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
