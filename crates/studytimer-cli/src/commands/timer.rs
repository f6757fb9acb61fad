use std::time::Duration;

use clap::Subcommand;
use studytimer_core::{Config, StudyStore};

use crate::common::{open_store, print_json};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a study session in the foreground; Ctrl-C stops and records it
    Run {
        /// Subject label for the session
        #[arg(long)]
        subject: Option<String>,
        /// Notes attached to the session
        #[arg(long)]
        content: Option<String>,
        /// Stop automatically after this many minutes
        #[arg(long)]
        minutes: Option<u64>,
        /// Tick cadence in seconds
        #[arg(long, default_value = "1")]
        interval: u64,
    },
    /// Print the timer snapshot as JSON (reminder interval, today's total)
    ///
    /// A session in progress lives only inside its `timer run` process, so
    /// from a separate invocation the state is always `idle`.
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;

    match action {
        TimerAction::Run {
            subject,
            content,
            minutes,
            interval,
        } => {
            if let Some(subject) = subject {
                store.select_subject(subject);
            }
            if let Some(event) = store.start() {
                print_json(&event)?;
            }
            if let Some(content) = content {
                store.record_content(content);
            }

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(drive(&mut store, minutes, Duration::from_secs(interval.max(1))))?;

            if let Some(event) = store.stop()? {
                print_json(&event)?;
            }
        }
        TimerAction::Status => {
            print_json(&store.snapshot())?;
        }
    }
    Ok(())
}

/// Tick the store until Ctrl-C or the optional minute limit is reached.
async fn drive(
    store: &mut StudyStore,
    limit_min: Option<u64>,
    every: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = tokio::time::interval(every);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            res = &mut ctrl_c => {
                res?;
                eprintln!();
                tracing::debug!("interrupted, stopping session");
                break;
            }
            _ = ticker.tick() => {
                if let Some(event) = store.tick() {
                    print_json(&event)?;
                }
                eprint!("\r{}", store.formatted_time());
                if let Some(limit) = limit_min {
                    if store.elapsed_secs() >= limit.saturating_mul(60) {
                        eprintln!();
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}
