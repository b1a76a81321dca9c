use chrono::NaiveDate;
use clap::Subcommand;
use focustimer_core::Config;

use super::{load_history, print_json, save_history, today, CliResult};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recorded sessions (defaults to today)
    List {
        /// Single day, YYYY-MM-DD
        #[arg(long, conflicts_with_all = ["from", "to"])]
        date: Option<NaiveDate>,
        /// Range start, YYYY-MM-DD
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// Range end, YYYY-MM-DD
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
        /// Every recorded session
        #[arg(long, conflicts_with_all = ["date", "from", "to"])]
        all: bool,
    },
    /// Delete all recorded sessions
    Clear,
}

pub fn run(action: HistoryAction, config: &Config) -> CliResult {
    let (store, policy, mut log) = load_history(config)?;

    match action {
        HistoryAction::List { date, from, to, all } => {
            let sessions = match (from, to) {
                _ if all => log.records().iter().collect(),
                (Some(from), Some(to)) => log.sessions_in_range(from, to)?,
                _ => log.sessions_on(date.unwrap_or_else(today)),
            };
            print_json(&sessions)
        }
        HistoryAction::Clear => {
            let removed = log.len();
            log.clear();
            save_history(&store, &policy, &log)?;
            eprintln!("removed {removed} sessions");
            Ok(())
        }
    }
}
