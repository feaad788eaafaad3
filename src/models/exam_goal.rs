use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ExamGoalStatus {
    Active,
    Achieved,
    NotAchieved,
}

impl ExamGoalStatus {
    /// Convert enum → DB string (stored labels match the historical schema)
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ExamGoalStatus::Active => "Active",
            ExamGoalStatus::Achieved => "Achieved",
            ExamGoalStatus::NotAchieved => "Not Achieved",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(ExamGoalStatus::Active),
            "Achieved" => Some(ExamGoalStatus::Achieved),
            "Not Achieved" => Some(ExamGoalStatus::NotAchieved),
            _ => None,
        }
    }

    /// Parse user-facing CLI input (active | achieved | missed)
    pub fn from_cli_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(ExamGoalStatus::Active),
            "achieved" => Some(ExamGoalStatus::Achieved),
            "missed" | "not-achieved" => Some(ExamGoalStatus::NotAchieved),
            _ => None,
        }
    }
}

/// A target score for an upcoming (or past) exam.
/// Status starts as Active and only changes via an explicit update.
#[derive(Debug, Clone, Serialize)]
pub struct ExamGoal {
    pub id: i32,
    pub subject: String,
    pub exam_name: String,
    pub exam_date: NaiveDate,
    pub target_score: i64,
    pub status: ExamGoalStatus,
    pub notes: String,
}
