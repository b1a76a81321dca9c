//! Append-only session history and the aggregates derived from it.
//!
//! Records are only ever appended at "now", so insertion order is
//! chronological. Every query takes the reference date explicitly and is a
//! pure function of it and the stored records.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::record::SessionRecord;
use crate::error::ValidationError;

/// Days covered by the trailing-week queries, today included.
pub const WEEK_DAYS: i64 = 7;

/// Completed work for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub completed_work_sessions: usize,
    pub completed_work_min: u64,
}

/// Summary used by the status and stats views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub date: NaiveDate,
    pub today_sessions: usize,
    pub today_work_min: u64,
    pub yesterday_sessions: usize,
    pub yesterday_work_min: u64,
    pub week_sessions: usize,
    pub week_work_min: u64,
    pub current_streak: u32,
    pub daily_goal_min: u32,
    /// 0.0 .. 100.0
    pub goal_progress_pct: f64,
    pub goal_reached: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLog {
    records: Vec<SessionRecord>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: SessionRecord) {
        self.records.push(record);
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ── Filtered views ───────────────────────────────────────────────

    /// Sessions whose start time falls on `date`.
    pub fn sessions_on(&self, date: NaiveDate) -> Vec<&SessionRecord> {
        self.records
            .iter()
            .filter(|r| r.start_time().date() == date)
            .collect()
    }

    /// Sessions started between `from` and `to`, both inclusive.
    pub fn sessions_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<&SessionRecord>, ValidationError> {
        check_range(from, to)?;
        Ok(self.in_range(from, to).collect())
    }

    /// Sessions in the trailing week ending with `today`.
    pub fn sessions_in_last_7_days(&self, today: NaiveDate) -> Vec<&SessionRecord> {
        self.in_range(week_start(today), today).collect()
    }

    // ── Aggregates ───────────────────────────────────────────────────

    pub fn completed_work_count_on(&self, date: NaiveDate) -> usize {
        self.completed_work_on(date).count()
    }

    pub fn completed_work_minutes_on(&self, date: NaiveDate) -> u64 {
        self.completed_work_on(date)
            .map(|r| u64::from(r.configured_duration_minutes()))
            .sum()
    }

    pub fn completed_work_count_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<usize, ValidationError> {
        check_range(from, to)?;
        Ok(self.in_range(from, to).filter(|r| r.is_completed_work()).count())
    }

    pub fn completed_work_minutes_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<u64, ValidationError> {
        check_range(from, to)?;
        Ok(self
            .in_range(from, to)
            .filter(|r| r.is_completed_work())
            .map(|r| u64::from(r.configured_duration_minutes()))
            .sum())
    }

    /// One entry per calendar day in `from..=to`, zero-filled.
    pub fn daily_totals(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyTotal>, ValidationError> {
        check_range(from, to)?;
        Ok(from
            .iter_days()
            .take_while(|day| *day <= to)
            .map(|date| DailyTotal {
                date,
                completed_work_sessions: self.completed_work_count_on(date),
                completed_work_min: self.completed_work_minutes_on(date),
            })
            .collect())
    }

    /// Consecutive days before `today` that each hold at least one completed
    /// work session. Today is still in progress and never counts.
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        let worked: HashSet<NaiveDate> = self
            .records
            .iter()
            .filter(|r| r.is_completed_work())
            .map(|r| r.start_time().date())
            .collect();

        let mut streak = 0;
        let mut day = today.pred_opt();
        while let Some(d) = day {
            if !worked.contains(&d) {
                break;
            }
            streak += 1;
            day = d.pred_opt();
        }
        streak
    }

    pub fn stats(&self, today: NaiveDate, daily_goal_min: u32) -> Stats {
        let yesterday = today.pred_opt().unwrap_or(today);
        let week = self
            .in_range(week_start(today), today)
            .filter(|r| r.is_completed_work());
        let (week_sessions, week_work_min) = week.fold((0, 0), |(n, min), r| {
            (n + 1, min + u64::from(r.configured_duration_minutes()))
        });

        let today_work_min = self.completed_work_minutes_on(today);
        let goal_progress_pct = if daily_goal_min == 0 {
            0.0
        } else {
            (today_work_min as f64 / f64::from(daily_goal_min) * 100.0).min(100.0)
        };

        Stats {
            date: today,
            today_sessions: self.completed_work_count_on(today),
            today_work_min,
            yesterday_sessions: self.completed_work_count_on(yesterday),
            yesterday_work_min: self.completed_work_minutes_on(yesterday),
            week_sessions,
            week_work_min,
            current_streak: self.current_streak(today),
            daily_goal_min,
            goal_progress_pct,
            goal_reached: daily_goal_min > 0 && today_work_min >= u64::from(daily_goal_min),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn completed_work_on(&self, date: NaiveDate) -> impl Iterator<Item = &SessionRecord> {
        self.records
            .iter()
            .filter(move |r| r.is_completed_work() && r.start_time().date() == date)
    }

    fn in_range(&self, from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = &SessionRecord> {
        self.records.iter().filter(move |r| {
            let day = r.start_time().date();
            from <= day && day <= to
        })
    }
}

impl FromIterator<SessionRecord> for SessionLog {
    fn from_iter<I: IntoIterator<Item = SessionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

fn check_range(from: NaiveDate, to: NaiveDate) -> Result<(), ValidationError> {
    if to < from {
        return Err(ValidationError::InvalidRange { from, to });
    }
    Ok(())
}

fn week_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_signed(Duration::days(WEEK_DAYS - 1))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionKind;
    use chrono::NaiveDateTime;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn at(d: u32, h: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn work(d: u32, minutes: u32) -> SessionRecord {
        SessionRecord::completed_work(at(d, 9), at(d, 10), minutes).unwrap()
    }

    #[test]
    fn sessions_on_filters_by_start_date() {
        let mut log = SessionLog::new();
        log.append(work(16, 25));
        log.append(work(17, 25));
        log.append(SessionRecord::completed_break(at(17, 10), at(17, 11), 5).unwrap());

        assert_eq!(log.sessions_on(day(17)).len(), 2);
        assert_eq!(log.sessions_on(day(16)).len(), 1);
        assert!(log.sessions_on(day(15)).is_empty());
    }

    #[test]
    fn only_completed_work_counts_toward_totals() {
        let mut log = SessionLog::new();
        log.append(work(17, 25));
        let cut = SessionRecord::interrupted(at(17, 11), at(17, 12), SessionKind::Work, 25);
        log.append(cut.unwrap());
        log.append(SessionRecord::completed_break(at(17, 12), at(17, 13), 5).unwrap());
        log.append(work(17, 50));

        assert_eq!(log.completed_work_count_on(day(17)), 2);
        assert_eq!(log.completed_work_minutes_on(day(17)), 75);
    }

    #[test]
    fn inverted_range_rejected() {
        let log = SessionLog::new();
        let err = log.sessions_in_range(day(17), day(10)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidRange {
                from: day(17),
                to: day(10)
            }
        );
        assert!(log.daily_totals(day(17), day(16)).is_err());
    }

    #[test]
    fn range_is_inclusive() {
        let log: SessionLog = [work(10, 25), work(11, 25), work(12, 25)].into_iter().collect();
        assert_eq!(log.sessions_in_range(day(10), day(11)).unwrap().len(), 2);
        assert_eq!(log.sessions_in_range(day(12), day(12)).unwrap().len(), 1);
        assert_eq!(log.completed_work_minutes_in_range(day(10), day(12)).unwrap(), 75);
    }

    #[test]
    fn trailing_week_includes_today_and_six_prior_days() {
        let log: SessionLog = [work(10, 25), work(11, 25), work(17, 25)].into_iter().collect();
        let week = log.sessions_in_last_7_days(day(17));
        assert_eq!(week.len(), 2);
    }

    #[test]
    fn streak_counts_days_before_today() {
        let log: SessionLog = [work(14, 25), work(15, 25), work(16, 25)].into_iter().collect();
        assert_eq!(log.current_streak(day(17)), 3);
    }

    #[test]
    fn streak_ignores_today() {
        let log: SessionLog = [work(16, 25), work(17, 25)].into_iter().collect();
        assert_eq!(log.current_streak(day(17)), 1);
    }

    #[test]
    fn streak_broken_by_empty_yesterday() {
        let log: SessionLog = [work(13, 25), work(14, 25), work(15, 25)].into_iter().collect();
        assert_eq!(log.current_streak(day(17)), 0);
    }

    #[test]
    fn streak_needs_completed_work() {
        let mut log = SessionLog::new();
        log.append(SessionRecord::completed_break(at(16, 9), at(16, 10), 5).unwrap());
        let cut = SessionRecord::interrupted(at(16, 11), at(16, 12), SessionKind::Work, 25);
        log.append(cut.unwrap());
        assert_eq!(log.current_streak(day(17)), 0);
    }

    #[test]
    fn daily_totals_zero_fill() {
        let log: SessionLog = [work(15, 25), work(15, 25), work(17, 50)].into_iter().collect();
        let totals = log.daily_totals(day(15), day(17)).unwrap();
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].completed_work_min, 50);
        assert_eq!(totals[1].completed_work_sessions, 0);
        assert_eq!(totals[2].completed_work_min, 50);
    }

    #[test]
    fn stats_summary() {
        let log: SessionLog = [work(9, 25), work(16, 25), work(17, 25), work(17, 25)]
            .into_iter()
            .collect();
        let stats = log.stats(day(17), 40);
        assert_eq!(stats.today_sessions, 2);
        assert_eq!(stats.today_work_min, 50);
        assert_eq!(stats.yesterday_sessions, 1);
        assert_eq!(stats.week_sessions, 3);
        assert_eq!(stats.week_work_min, 75);
        assert_eq!(stats.current_streak, 1);
        assert!(stats.goal_reached);
        assert_eq!(stats.goal_progress_pct, 100.0);
    }

    #[test]
    fn clear_empties_log() {
        let mut log: SessionLog = [work(16, 25)].into_iter().collect();
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.current_streak(day(17)), 0);
    }
}
