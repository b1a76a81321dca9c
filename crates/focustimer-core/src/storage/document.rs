//! On-disk JSON document.
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "settings": { "workMinutes": 25, "breakMinutes": 5, "dailyGoalMinutes": 25 },
//!   "sessions": [
//!     { "startTime": "2026-10-17T09:00:00", "endTime": "2026-10-17T09:25:00",
//!       "kind": "work", "durationMinutes": 25, "completed": true }
//!   ]
//! }
//! ```
//!
//! Timestamps are local date-times without an offset. Decoding runs every
//! value back through the model constructors, so a document that parses but
//! breaks an invariant is rejected as a whole.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::durations::DurationPolicy;
use crate::error::StorageError;
use crate::session::{SessionKind, SessionLog, SessionRecord};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    pub schema_version: u32,
    pub settings: SettingsEntry,
    #[serde(default)]
    pub sessions: Vec<SessionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsEntry {
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub daily_goal_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub kind: SessionKind,
    pub duration_minutes: u32,
    pub completed: bool,
}

impl StoreDocument {
    pub fn from_model(policy: &DurationPolicy, log: &SessionLog) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            settings: SettingsEntry {
                work_minutes: policy.work_minutes(),
                break_minutes: policy.break_minutes(),
                daily_goal_minutes: policy.daily_goal_minutes(),
            },
            sessions: log.records().iter().map(SessionEntry::from).collect(),
        }
    }

    pub fn into_model(self) -> Result<(DurationPolicy, SessionLog), StorageError> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchema {
                found: self.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        let policy = DurationPolicy::new(
            self.settings.work_minutes,
            self.settings.break_minutes,
            self.settings.daily_goal_minutes,
        )?;
        let log = self
            .sessions
            .into_iter()
            .map(SessionRecord::try_from)
            .collect::<Result<SessionLog, _>>()?;
        Ok((policy, log))
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&SessionRecord> for SessionEntry {
    fn from(record: &SessionRecord) -> Self {
        Self {
            start_time: record.start_time(),
            end_time: record.end_time(),
            kind: record.kind(),
            duration_minutes: record.configured_duration_minutes(),
            completed: record.completed(),
        }
    }
}

impl TryFrom<SessionEntry> for SessionRecord {
    type Error = crate::error::ValidationError;

    fn try_from(entry: SessionEntry) -> Result<Self, Self::Error> {
        match (entry.completed, entry.kind) {
            (true, SessionKind::Work) => SessionRecord::completed_work(
                entry.start_time,
                entry.end_time,
                entry.duration_minutes,
            ),
            (true, SessionKind::Break) => SessionRecord::completed_break(
                entry.start_time,
                entry.end_time,
                entry.duration_minutes,
            ),
            (false, kind) => SessionRecord::interrupted(
                entry.start_time,
                entry.end_time,
                kind,
                entry.duration_minutes,
            ),
        }
    }
}

/// Decode a JSON document straight into the model.
pub fn decode(json: &str) -> Result<(DurationPolicy, SessionLog), StorageError> {
    StoreDocument::from_json(json)?.into_model()
}

/// Encode the model as a JSON document.
pub fn encode(policy: &DurationPolicy, log: &SessionLog) -> Result<String, StorageError> {
    StoreDocument::from_model(policy, log).to_json()
}
