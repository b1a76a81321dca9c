//! Countdown engine.
//!
//! The engine owns the remaining-time counter and the current mode. It has no
//! timer of its own: an external ticker calls `tick()` once per second while
//! the countdown runs, and ticks that arrive while idle or paused are ignored.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running(kind) --pause--> Paused(kind) --resume--> Running(kind)
//! Running/Paused --tick to zero | skip--> (ZeroReached) ; owner calls reset()
//! any --reset--> Idle
//! ```

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::ValidationError;
use crate::events::Event;
use crate::session::SessionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "kind", rename_all = "lowercase")]
pub enum EngineMode {
    Idle,
    Running(SessionKind),
    /// Remembers the mode that was running before the pause.
    Paused(SessionKind),
}

impl EngineMode {
    pub fn is_idle(self) -> bool {
        matches!(self, EngineMode::Idle)
    }

    pub fn is_running(self) -> bool {
        matches!(self, EngineMode::Running(_))
    }

    pub fn is_paused(self) -> bool {
        matches!(self, EngineMode::Paused(_))
    }

    pub fn is_work_phase(self) -> bool {
        self.kind() == Some(SessionKind::Work)
    }

    /// The interval kind this mode belongs to, paused or not.
    pub fn kind(self) -> Option<SessionKind> {
        match self {
            EngineMode::Idle => None,
            EngineMode::Running(kind) | EngineMode::Paused(kind) => Some(kind),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EngineMode::Idle => "idle",
            EngineMode::Running(SessionKind::Work) => "work",
            EngineMode::Running(SessionKind::Break) => "break",
            EngineMode::Paused(_) => "paused",
        }
    }
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signal raised when the countdown reaches zero. Carries no data; the
/// owner reads whatever context it needs before calling `reset()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a finished countdown has to be handled"]
pub struct ZeroReached;

pub type Listener = Box<dyn FnMut(&Event)>;

pub struct CountdownEngine {
    mode: EngineMode,
    remaining_secs: u64,
    ticking: bool,
    listeners: Vec<Listener>,
}

impl CountdownEngine {
    pub fn new() -> Self {
        Self {
            mode: EngineMode::Idle,
            remaining_secs: 0,
            ticking: false,
            listeners: Vec::new(),
        }
    }

    /// Register an observer for ticks, mode changes and completions.
    pub fn subscribe(&mut self, listener: impl FnMut(&Event) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn mode_before_pause(&self) -> Option<SessionKind> {
        match self.mode {
            EngineMode::Paused(kind) => Some(kind),
            _ => None,
        }
    }

    /// Whether the next `tick()` will count down.
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a fresh countdown, cancelling whatever was running.
    pub fn start(&mut self, seconds: u64, kind: SessionKind) -> Result<(), ValidationError> {
        if seconds == 0 {
            return Err(ValidationError::InvalidArgument(
                "countdown length must be positive".into(),
            ));
        }
        self.remaining_secs = seconds;
        self.ticking = true;
        self.set_mode(EngineMode::Running(kind));
        self.emit(Event::CountdownStarted {
            kind,
            duration_secs: seconds,
        });
        Ok(())
    }

    /// Returns false when nothing was running.
    pub fn pause(&mut self) -> bool {
        match self.mode {
            EngineMode::Running(kind) => {
                self.ticking = false;
                self.set_mode(EngineMode::Paused(kind));
                true
            }
            _ => false,
        }
    }

    /// Returns false unless paused.
    pub fn resume(&mut self) -> bool {
        match self.mode {
            EngineMode::Paused(kind) => {
                self.ticking = true;
                self.set_mode(EngineMode::Running(kind));
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.ticking = false;
        self.remaining_secs = 0;
        self.set_mode(EngineMode::Idle);
    }

    /// Jump straight to zero. No-op when idle.
    pub fn skip(&mut self) -> Option<ZeroReached> {
        let kind = self.mode.kind()?;
        self.ticking = false;
        self.remaining_secs = 0;
        Some(self.finish(kind))
    }

    /// Count one unit of elapsed time.
    pub fn tick(&mut self) -> Option<ZeroReached> {
        if !self.ticking {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.emit(Event::Tick {
            remaining_secs: self.remaining_secs,
        });
        if self.remaining_secs > 0 {
            return None;
        }
        self.ticking = false;
        let kind = self.mode.kind()?;
        Some(self.finish(kind))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn finish(&mut self, kind: SessionKind) -> ZeroReached {
        debug!(%kind, "countdown reached zero");
        self.emit(Event::CountdownFinished { kind });
        ZeroReached
    }

    fn set_mode(&mut self, to: EngineMode) {
        let from = self.mode;
        if from == to {
            return;
        }
        self.mode = to;
        debug!(%from, %to, remaining_secs = self.remaining_secs, "countdown mode changed");
        self.emit(Event::ModeChanged { from, to });
    }

    fn emit(&mut self, event: Event) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CountdownEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownEngine")
            .field("mode", &self.mode)
            .field("remaining_secs", &self.remaining_secs)
            .field("ticking", &self.ticking)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
