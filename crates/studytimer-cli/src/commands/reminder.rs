use clap::Subcommand;
use studytimer_core::Config;

use crate::common::open_store;

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Print the reminder interval in minutes
    Get,
    /// Set the reminder interval in minutes (0 disables reminders)
    Set {
        /// Interval in minutes
        minutes: u32,
    },
}

pub fn run(action: ReminderAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;

    match action {
        ReminderAction::Get => println!("{}", store.reminder_interval()),
        ReminderAction::Set { minutes } => {
            store.set_reminder_interval(minutes)?;
            println!("ok");
        }
    }
    Ok(())
}
