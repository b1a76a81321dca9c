pub mod config;
pub mod history;
pub mod settings;
pub mod stats;
pub mod timer;

use chrono::NaiveDate;
use focustimer_core::{Clock, Config, DurationPolicy, JsonStore, SessionLog, SystemClock};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Store at the configured location.
pub fn open_store(config: &Config) -> focustimer_core::Result<JsonStore> {
    Ok(JsonStore::from_config(config)?)
}

/// Load the store strictly, so a broken file is reported and left alone.
pub fn load_history(
    config: &Config,
) -> focustimer_core::Result<(JsonStore, DurationPolicy, SessionLog)> {
    let store = open_store(config)?;
    let (policy, log) = store.try_load()?;
    Ok((store, policy, log))
}

/// Write the store, failing the command if the file cannot be written.
pub fn save_history(
    store: &JsonStore,
    policy: &DurationPolicy,
    log: &SessionLog,
) -> focustimer_core::Result<()> {
    Ok(store.try_save(policy, log)?)
}

pub fn today() -> NaiveDate {
    SystemClock.today()
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
