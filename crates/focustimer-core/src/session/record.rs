use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The two schedulable interval kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Work,
    Break,
}

impl SessionKind {
    /// Work follows break and break follows work.
    pub fn opposite(self) -> Self {
        match self {
            SessionKind::Work => SessionKind::Break,
            SessionKind::Break => SessionKind::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::Break => "break",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One finished or abandoned interval. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    kind: SessionKind,
    configured_duration_minutes: u32,
    completed: bool,
}

impl SessionRecord {
    fn build(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        kind: SessionKind,
        configured_duration_minutes: u32,
        completed: bool,
    ) -> Result<Self, ValidationError> {
        if configured_duration_minutes == 0 {
            return Err(ValidationError::InvalidSession(
                "configured duration must be positive".into(),
            ));
        }
        if end_time < start_time {
            return Err(ValidationError::InvalidSession(format!(
                "end time {end_time} is before start time {start_time}"
            )));
        }
        Ok(Self {
            start_time,
            end_time,
            kind,
            configured_duration_minutes,
            completed,
        })
    }

    /// A work interval whose countdown reached zero.
    pub fn completed_work(
        start: NaiveDateTime,
        end: NaiveDateTime,
        minutes: u32,
    ) -> Result<Self, ValidationError> {
        Self::build(start, end, SessionKind::Work, minutes, true)
    }

    /// A break interval whose countdown reached zero.
    pub fn completed_break(
        start: NaiveDateTime,
        end: NaiveDateTime,
        minutes: u32,
    ) -> Result<Self, ValidationError> {
        Self::build(start, end, SessionKind::Break, minutes, true)
    }

    /// An interval the user skipped before it ran out.
    pub fn interrupted(
        start: NaiveDateTime,
        end: NaiveDateTime,
        kind: SessionKind,
        minutes: u32,
    ) -> Result<Self, ValidationError> {
        Self::build(start, end, kind, minutes, false)
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Planned length, not elapsed wall-clock time.
    pub fn configured_duration_minutes(&self) -> u32 {
        self.configured_duration_minutes
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn is_completed_work(&self) -> bool {
        self.kind == SessionKind::Work && self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn factories_set_kind_and_completion() {
        let work = SessionRecord::completed_work(at(9, 0), at(9, 25), 25).unwrap();
        assert_eq!(work.kind(), SessionKind::Work);
        assert!(work.completed());
        assert!(work.is_completed_work());

        let rest = SessionRecord::completed_break(at(9, 25), at(9, 30), 5).unwrap();
        assert_eq!(rest.kind(), SessionKind::Break);
        assert!(rest.completed());
        assert!(!rest.is_completed_work());

        let cut = SessionRecord::interrupted(at(10, 0), at(10, 3), SessionKind::Work, 25).unwrap();
        assert!(!cut.completed());
        assert!(!cut.is_completed_work());
        assert_eq!(cut.configured_duration_minutes(), 25);
    }

    #[test]
    fn zero_minutes_rejected() {
        let err = SessionRecord::completed_work(at(9, 0), at(9, 25), 0).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSession(_)));
    }

    #[test]
    fn end_before_start_rejected() {
        let err = SessionRecord::completed_break(at(9, 30), at(9, 25), 5).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSession(_)));
    }

    #[test]
    fn zero_length_interval_allowed() {
        assert!(SessionRecord::interrupted(at(9, 0), at(9, 0), SessionKind::Break, 5).is_ok());
    }

    #[test]
    fn opposite_kind() {
        assert_eq!(SessionKind::Work.opposite(), SessionKind::Break);
        assert_eq!(SessionKind::Break.opposite(), SessionKind::Work);
    }
}
