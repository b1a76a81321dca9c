//! # focustimer Core Library
//!
//! Core logic for the focustimer work/break timer. The CLI is a thin layer
//! over this crate; everything here runs on a single event-loop thread.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: owns the remaining seconds and the current mode;
//!   the caller delivers one `tick()` per second
//! - **Session Orchestrator**: the state machine mapping start/pause/resume/
//!   reset/skip and countdown expiry onto engine transitions and history writes
//! - **Session Log**: append-only history with per-day, weekly and streak views
//! - **Storage**: JSON document for durations and history, TOML app config
//!
//! ## Key Components
//!
//! - [`SessionOrchestrator`]: Core timer state machine
//! - [`CountdownEngine`]: Countdown counter and mode
//! - [`SessionLog`]: Session history and statistics
//! - [`DurationPolicy`]: Validated work/break/goal lengths
//! - [`PersistenceSink`]: Trait for durable storage

pub mod clock;
pub mod durations;
pub mod error;
pub mod events;
pub mod notify;
pub mod session;
pub mod storage;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use durations::{DurationBounds, DurationPolicy};
pub use error::{ConfigError, CoreError, NotifyError, Result, StorageError, ValidationError};
pub use events::Event;
pub use notify::{LogNotifier, Notifier};
pub use session::{DailyTotal, SessionKind, SessionLog, SessionRecord, Stats};
pub use storage::{Config, JsonStore, MemoryStore, PersistenceSink};
pub use timer::{CountdownEngine, EngineMode, SessionOrchestrator, Status, Ticker};
