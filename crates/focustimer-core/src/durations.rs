//! Configured work/break/goal durations.
//!
//! Every setter validates against the policy's [`DurationBounds`] and rejects
//! out-of-range values; nothing is ever clamped.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_DAILY_GOAL_MINUTES: u32 = 25;

/// Inclusive bounds, in minutes, for every configured duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBounds {
    pub min: u32,
    pub max: u32,
}

impl DurationBounds {
    pub fn contains(&self, minutes: u32) -> bool {
        (self.min..=self.max).contains(&minutes)
    }

    fn check(&self, field: &'static str, value: u32) -> Result<u32, ValidationError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(ValidationError::InvalidDuration {
                field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl Default for DurationBounds {
    fn default() -> Self {
        Self { min: 1, max: 900 }
    }
}

/// Work, break and daily-goal lengths in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationPolicy {
    #[serde(skip)]
    bounds: DurationBounds,
    work_minutes: u32,
    break_minutes: u32,
    daily_goal_minutes: u32,
}

impl DurationPolicy {
    /// Build a policy with explicit values, validating each one.
    pub fn new(
        work_minutes: u32,
        break_minutes: u32,
        daily_goal_minutes: u32,
    ) -> Result<Self, ValidationError> {
        Self::with_bounds(
            DurationBounds::default(),
            work_minutes,
            break_minutes,
            daily_goal_minutes,
        )
    }

    pub fn with_bounds(
        bounds: DurationBounds,
        work_minutes: u32,
        break_minutes: u32,
        daily_goal_minutes: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            bounds,
            work_minutes: bounds.check("workMinutes", work_minutes)?,
            break_minutes: bounds.check("breakMinutes", break_minutes)?,
            daily_goal_minutes: bounds.check("dailyGoalMinutes", daily_goal_minutes)?,
        })
    }

    pub fn bounds(&self) -> DurationBounds {
        self.bounds
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn daily_goal_minutes(&self) -> u32 {
        self.daily_goal_minutes
    }

    pub fn work_seconds(&self) -> u64 {
        u64::from(self.work_minutes) * 60
    }

    pub fn break_seconds(&self) -> u64 {
        u64::from(self.break_minutes) * 60
    }

    pub fn set_work_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.work_minutes = self.bounds.check("workMinutes", minutes)?;
        Ok(())
    }

    pub fn set_break_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.break_minutes = self.bounds.check("breakMinutes", minutes)?;
        Ok(())
    }

    pub fn set_daily_goal_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.daily_goal_minutes = self.bounds.check("dailyGoalMinutes", minutes)?;
        Ok(())
    }
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self {
            bounds: DurationBounds::default(),
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            daily_goal_minutes: DEFAULT_DAILY_GOAL_MINUTES,
        }
    }
}
