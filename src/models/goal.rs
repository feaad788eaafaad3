use super::goal_type::GoalType;
use chrono::NaiveDate;
use serde::Serialize;

/// Sentinel subject meaning "every subject counts towards this goal".
pub const ALL_SUBJECTS: &str = "All";

/// A study-time target for one period (a day, or a Monday-anchored week).
/// At most one row exists per (goal_type, subject, start_date).
#[derive(Debug, Clone, Serialize)]
pub struct Goal {
    pub id: i32,
    pub goal_type: GoalType,
    pub subject: String,      // specific subject or ALL_SUBJECTS
    pub start_date: NaiveDate, // the day, or the Monday of the week
    pub target_minutes: i64,
    pub notes: String,
}

/// Progress of one goal: summed logged minutes against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    pub target_minutes: i64,
    pub progress_minutes: i64,
}

impl GoalProgress {
    /// Uncapped percentage; can exceed 100.
    pub fn percent(&self) -> f64 {
        if self.target_minutes <= 0 {
            return 100.0;
        }
        self.progress_minutes as f64 / self.target_minutes as f64 * 100.0
    }
}
