use clap::Subcommand;
use studytimer_core::Config;

use crate::common::print_json;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value by dot-separated key
    Get {
        /// e.g. "notifications.enabled", "reminder.default_interval_min"
        key: String,
    },
    /// Change one value and save; prints the stored value
    Set { key: String, value: String },
    /// Print the whole config as JSON
    List,
    /// Overwrite config.toml with defaults (works on an unparsable file too)
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match action {
        ConfigAction::Reset => Config::default(),
        _ => Config::load()?,
    };

    match action {
        ConfigAction::Get { key } => println!("{}", lookup(&config, &key)?),
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            println!("{}", lookup(&config, &key)?);
        }
        ConfigAction::List => print_json(&config)?,
        ConfigAction::Reset => {
            config.save()?;
            print_json(&config)?;
        }
    }
    Ok(())
}

fn lookup(config: &Config, key: &str) -> Result<String, String> {
    config.get(key).ok_or_else(|| format!("unknown key: {key}"))
}
