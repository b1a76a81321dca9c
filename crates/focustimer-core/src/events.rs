use serde::Serialize;

use crate::session::SessionKind;
use crate::timer::EngineMode;

/// Every countdown state change produces an Event.
/// Observers registered on the engine receive them in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    CountdownStarted {
        kind: SessionKind,
        duration_secs: u64,
    },
    /// One unit of time elapsed while running.
    Tick {
        remaining_secs: u64,
    },
    ModeChanged {
        from: EngineMode,
        to: EngineMode,
    },
    /// Countdown hit zero, naturally or through a skip.
    CountdownFinished {
        kind: SessionKind,
    },
}
