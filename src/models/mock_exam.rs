use chrono::NaiveDate;
use serde::Serialize;

/// A recorded mock-exam result. The numeric fields are optional:
/// blank input maps to NULL in the DB, never to zero.
#[derive(Debug, Clone, Serialize)]
pub struct MockExam {
    pub id: i32,
    pub date: NaiveDate,
    pub subject: String,
    pub exam_name: String,
    pub score: Option<i64>,
    pub max_score: Option<i64>,
    pub deviation_value: Option<f64>,
}

impl MockExam {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
