//! Subject management commands for CLI.

use clap::Subcommand;
use studytimer_core::Config;

use crate::common::{open_store, print_json};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject
    Add {
        /// Display name
        name: String,
    },
    /// Remove a subject by ID
    Remove {
        /// Subject ID
        id: String,
    },
    /// Rename a subject
    Rename {
        /// Subject ID
        id: String,
        /// New display name
        name: String,
    },
    /// List subjects as JSON
    List,
}

pub fn run(action: SubjectAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;

    match action {
        SubjectAction::Add { name } => {
            let event = store.add_subject(name)?;
            print_json(&event)?;
        }
        SubjectAction::Remove { id } => match store.remove_subject(&id)? {
            Some(event) => print_json(&event)?,
            None => eprintln!("no subject with id {id}"),
        },
        SubjectAction::Rename { id, name } => match store.update_subject(&id, name)? {
            Some(event) => print_json(&event)?,
            None => eprintln!("no subject with id {id}"),
        },
        SubjectAction::List => {
            print_json(&store.subjects())?;
        }
    }
    Ok(())
}
