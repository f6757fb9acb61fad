use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use studytimer_core::{format_hms, Config};

use crate::common::{open_store, print_json};

#[derive(Subcommand)]
pub enum SessionsAction {
    /// Sessions recorded today
    Today,
    /// Recorded sessions, optionally for one date
    List {
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Total study time for a date (default: today)
    Total {
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Serialize)]
struct Total {
    date: NaiveDate,
    sessions: usize,
    total_secs: u64,
    formatted: String,
}

pub fn run(action: SessionsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = open_store(&config)?;

    match action {
        SessionsAction::Today => {
            print_json(&store.today_sessions())?;
        }
        SessionsAction::List { date } => match date {
            Some(date) => print_json(&store.sessions_on(date))?,
            None => print_json(&store.sessions())?,
        },
        SessionsAction::Total { date } => {
            let date = date.unwrap_or_else(|| store.today());
            let total_secs = store.total_on(date);
            print_json(&Total {
                date,
                sessions: store.sessions_on(date).len(),
                total_secs,
                formatted: format_hms(total_secs),
            })?;
        }
    }
    Ok(())
}
