mod log;
mod record;

pub use log::{DailyTotal, SessionLog, Stats, WEEK_DAYS};
pub use record::{SessionKind, SessionRecord};
