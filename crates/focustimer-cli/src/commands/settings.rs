use clap::Subcommand;
use focustimer_core::Config;

use super::{load_history, print_json, save_history, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print work/break/goal minutes
    Show,
    /// Change one or more durations (minutes, 1-900)
    Set {
        #[arg(long)]
        work: Option<u32>,
        #[arg(long = "break")]
        break_minutes: Option<u32>,
        #[arg(long)]
        goal: Option<u32>,
    },
}

pub fn run(action: SettingsAction, config: &Config) -> CliResult {
    let (store, policy, log) = load_history(config)?;

    match action {
        SettingsAction::Show => print_json(&policy),
        SettingsAction::Set {
            work,
            break_minutes,
            goal,
        } => {
            if work.is_none() && break_minutes.is_none() && goal.is_none() {
                return Err("nothing to change; pass --work, --break or --goal".into());
            }
            // Nothing is written unless every value passes.
            let mut updated = policy;
            if let Some(minutes) = work {
                updated.set_work_minutes(minutes)?;
            }
            if let Some(minutes) = break_minutes {
                updated.set_break_minutes(minutes)?;
            }
            if let Some(minutes) = goal {
                updated.set_daily_goal_minutes(minutes)?;
            }
            save_history(&store, &updated, &log)?;
            print_json(&updated)
        }
    }
}
