use clap::Subcommand;
use chrono::Duration;
use focustimer_core::session::WEEK_DAYS;
use focustimer_core::Config;
use serde::Serialize;

use super::{load_history, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's stats
    Today,
    /// Per-day totals for the trailing week
    Week,
    /// Current streak of worked days
    Streak,
}

#[derive(Serialize)]
struct StreakOutput {
    current_streak: u32,
}

pub fn run(action: StatsAction, config: &Config) -> CliResult {
    let (_, policy, log) = load_history(config)?;
    let today = today();

    match action {
        StatsAction::Today => print_json(&log.stats(today, policy.daily_goal_minutes())),
        StatsAction::Week => {
            let from = today - Duration::days(WEEK_DAYS - 1);
            print_json(&log.daily_totals(from, today)?)
        }
        StatsAction::Streak => print_json(&StreakOutput {
            current_streak: log.current_streak(today),
        }),
    }
}
