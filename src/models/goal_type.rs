use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum GoalType {
    Daily,
    Weekly,
}

impl GoalType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            GoalType::Daily => "daily",
            GoalType::Weekly => "weekly",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" => Some(GoalType::Daily),
            "weekly" => Some(GoalType::Weekly),
            _ => None,
        }
    }

    /// First day of the period containing `reference`.
    /// Daily goals anchor on the day itself, weekly goals on Monday.
    pub fn period_start(&self, reference: NaiveDate) -> NaiveDate {
        match self {
            GoalType::Daily => reference,
            GoalType::Weekly => {
                reference - Duration::days(reference.weekday().num_days_from_monday() as i64)
            }
        }
    }

    /// Last day of the period containing `reference` (inclusive).
    pub fn period_end(&self, reference: NaiveDate) -> NaiveDate {
        match self {
            GoalType::Daily => reference,
            GoalType::Weekly => self.period_start(reference) + Duration::days(6),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoalType::Daily => "Daily",
            GoalType::Weekly => "Weekly",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn daily_period_is_the_day_itself() {
        let day = d("2026-08-19");
        assert_eq!(GoalType::Daily.period_start(day), day);
        assert_eq!(GoalType::Daily.period_end(day), day);
    }

    #[test]
    fn weekly_period_runs_monday_to_sunday() {
        // 2026-08-19 is a Wednesday
        let day = d("2026-08-19");
        assert_eq!(GoalType::Weekly.period_start(day), d("2026-08-17"));
        assert_eq!(GoalType::Weekly.period_end(day), d("2026-08-23"));
    }

    #[test]
    fn weekly_period_on_monday_starts_that_day() {
        let monday = d("2026-08-17");
        assert_eq!(GoalType::Weekly.period_start(monday), monday);
        assert_eq!(GoalType::Weekly.period_end(monday), d("2026-08-23"));
    }
}
