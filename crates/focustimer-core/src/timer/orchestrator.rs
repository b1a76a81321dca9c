//! Session orchestrator.
//!
//! Maps user intents (start, pause, resume, reset, skip) and countdown
//! completions onto engine transitions, writes finished sessions to the log,
//! persists, and notifies.
//!
//! ```text
//! Idle --start_work/start_break--> Work/Break
//! Work/Break --pause--> Paused (remembers prior mode)
//! Paused --resume--> Work/Break (restored)
//! Work/Break --expiry or skip--> (record session) --> Idle, with pending_next set
//! any --reset--> Idle (no session recorded)
//! ```
//!
//! Transitions are never automatic: after a completion the engine sits in
//! Idle and `pending_next` says which kind `start_or_resume` will begin.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::countdown::{CountdownEngine, EngineMode, ZeroReached};
use crate::clock::{Clock, SystemClock};
use crate::durations::DurationPolicy;
use crate::error::ValidationError;
use crate::events::Event;
use crate::notify::Notifier;
use crate::session::{SessionKind, SessionLog, SessionRecord, Stats};
use crate::storage::PersistenceSink;

/// The interval currently on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveSession {
    pub kind: SessionKind,
    pub started_at: NaiveDateTime,
    /// Configured minutes at the time the session started.
    pub duration_min: u32,
}

/// Snapshot for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub mode: EngineMode,
    pub remaining_secs: u64,
    pub active: Option<ActiveSession>,
    pub pending_next: Option<SessionKind>,
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub today_work_min: u64,
    pub daily_goal_min: u32,
    pub current_streak: u32,
}

pub struct SessionOrchestrator<S, N, C = SystemClock> {
    policy: DurationPolicy,
    log: SessionLog,
    engine: CountdownEngine,
    sink: S,
    notifier: N,
    clock: C,
    active: Option<ActiveSession>,
    pending_next: Option<SessionKind>,
}

impl<S: PersistenceSink, N: Notifier> SessionOrchestrator<S, N, SystemClock> {
    /// Load policy and history from `sink` and start idle.
    pub fn new(sink: S, notifier: N) -> Self {
        Self::with_clock(sink, notifier, SystemClock)
    }
}

impl<S: PersistenceSink, N: Notifier, C: Clock> SessionOrchestrator<S, N, C> {
    pub fn with_clock(sink: S, notifier: N, clock: C) -> Self {
        let (policy, log) = sink.load();
        debug!(sessions = log.len(), "orchestrator loaded history");
        Self::with_state(policy, log, sink, notifier, clock)
    }

    /// Take over an already loaded policy and history.
    pub fn with_state(
        policy: DurationPolicy,
        log: SessionLog,
        sink: S,
        notifier: N,
        clock: C,
    ) -> Self {
        Self {
            policy,
            log,
            engine: CountdownEngine::new(),
            sink,
            notifier,
            clock,
            active: None,
            pending_next: None,
        }
    }

    /// Register an observer on the countdown engine.
    pub fn subscribe(&mut self, listener: impl FnMut(&Event) + 'static) {
        self.engine.subscribe(listener);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> EngineMode {
        self.engine.mode()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.engine.remaining_secs()
    }

    pub fn is_ticking(&self) -> bool {
        self.engine.is_ticking()
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub fn pending_next(&self) -> Option<SessionKind> {
        self.pending_next
    }

    pub fn policy(&self) -> &DurationPolicy {
        &self.policy
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn todays_total_work_minutes(&self) -> u64 {
        self.log.completed_work_minutes_on(self.clock.today())
    }

    pub fn current_streak(&self) -> u32 {
        self.log.current_streak(self.clock.today())
    }

    pub fn stats(&self) -> Stats {
        self.log
            .stats(self.clock.today(), self.policy.daily_goal_minutes())
    }

    pub fn status(&self) -> Status {
        Status {
            mode: self.engine.mode(),
            remaining_secs: self.engine.remaining_secs(),
            active: self.active,
            pending_next: self.pending_next,
            work_minutes: self.policy.work_minutes(),
            break_minutes: self.policy.break_minutes(),
            today_work_min: self.todays_total_work_minutes(),
            daily_goal_min: self.policy.daily_goal_minutes(),
            current_streak: self.current_streak(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start_work(&mut self) -> Result<(), ValidationError> {
        self.start(SessionKind::Work)
    }

    pub fn start_break(&mut self) -> Result<(), ValidationError> {
        self.start(SessionKind::Break)
    }

    /// The single "go" action: begins the pending kind (work by default)
    /// when idle, resumes when paused, and does nothing while running.
    pub fn start_or_resume(&mut self) -> Result<(), ValidationError> {
        match self.engine.mode() {
            EngineMode::Idle => match self.pending_next {
                Some(SessionKind::Break) => self.start_break(),
                Some(SessionKind::Work) | None => self.start_work(),
            },
            EngineMode::Paused(_) => {
                self.engine.resume();
                Ok(())
            }
            EngineMode::Running(_) => Ok(()),
        }
    }

    pub fn pause(&mut self) -> bool {
        self.engine.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.engine.resume()
    }

    /// Abandon the current interval without recording it.
    pub fn reset(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(kind = %active.kind, "session abandoned");
        }
        self.pending_next = None;
        self.engine.reset();
    }

    /// End the current interval early. It is logged as interrupted, the
    /// notifier is told, and `pending_next` flips to the other kind.
    pub fn skip(&mut self) -> Result<(), ValidationError> {
        let recorded = match self.active.take() {
            Some(active) => {
                let record = SessionRecord::interrupted(
                    active.started_at,
                    self.clock.now(),
                    active.kind,
                    active.duration_min,
                );
                Some(record.map(|record| self.record(record)))
            }
            None => None,
        };

        // The engine raises the same zero-reached signal as a natural
        // expiry; with `active` already cleared the handler records nothing.
        let finished = match self.engine.skip() {
            Some(signal) => self.on_zero_reached(signal),
            None => Ok(()),
        };

        recorded.transpose()?;
        finished
    }

    /// Forward one unit of elapsed time to the engine.
    pub fn tick(&mut self) -> Result<(), ValidationError> {
        match self.engine.tick() {
            Some(signal) => self.on_zero_reached(signal),
            None => Ok(()),
        }
    }

    /// Change work and break lengths. Both values are checked before either
    /// is applied. Takes effect from the next started interval.
    pub fn update_durations(
        &mut self,
        work_minutes: u32,
        break_minutes: u32,
    ) -> Result<(), ValidationError> {
        let mut updated = self.policy.clone();
        updated.set_work_minutes(work_minutes)?;
        updated.set_break_minutes(break_minutes)?;
        self.policy = updated;
        self.persist();
        Ok(())
    }

    pub fn set_daily_goal_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.policy.set_daily_goal_minutes(minutes)?;
        self.persist();
        Ok(())
    }

    /// Drop every recorded session.
    pub fn clear_history(&mut self) {
        self.log.clear();
        info!("session history cleared");
        self.persist();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn start(&mut self, kind: SessionKind) -> Result<(), ValidationError> {
        let (minutes, seconds) = match kind {
            SessionKind::Work => (self.policy.work_minutes(), self.policy.work_seconds()),
            SessionKind::Break => (self.policy.break_minutes(), self.policy.break_seconds()),
        };
        self.engine.start(seconds, kind)?;
        self.active = Some(ActiveSession {
            kind,
            started_at: self.clock.now(),
            duration_min: minutes,
        });
        debug!(%kind, minutes, "session started");
        Ok(())
    }

    fn on_zero_reached(&mut self, _signal: ZeroReached) -> Result<(), ValidationError> {
        let finished_kind = self.engine.mode().kind();

        let recorded = match self.active.take() {
            Some(active) => {
                let end = self.clock.now();
                let record = match active.kind {
                    SessionKind::Work => {
                        SessionRecord::completed_work(active.started_at, end, active.duration_min)
                    }
                    SessionKind::Break => {
                        SessionRecord::completed_break(active.started_at, end, active.duration_min)
                    }
                };
                record.map(|record| self.record(record))
            }
            None => Ok(()),
        };

        if let Some(kind) = finished_kind {
            self.pending_next = Some(kind.opposite());
        }
        self.engine.reset();
        recorded
    }

    /// Append, persist, then notify.
    fn record(&mut self, record: SessionRecord) {
        let kind = record.kind();
        info!(
            %kind,
            completed = record.completed(),
            minutes = record.configured_duration_minutes(),
            "session recorded"
        );
        self.log.append(record);
        self.persist();
        if let Err(err) = self.notifier.notify_completion(kind) {
            warn!(%kind, error = %err, "completion notification failed");
        }
    }

    fn persist(&mut self) {
        self.sink.save(&self.policy, &self.log);
    }
}
