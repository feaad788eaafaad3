use chrono::{Local, NaiveDate};
use serde::Serialize;

/// One logged study session.
#[derive(Debug, Clone, Serialize)]
pub struct StudyEntry {
    pub id: i32,
    pub date: NaiveDate,    // ⇔ study_log.date (TEXT "YYYY-MM-DD")
    pub subject: String,    // ⇔ study_log.subject
    pub minutes: i64,       // ⇔ study_log.minutes (always > 0)
    pub source: String,     // ⇔ study_log.source ('manual' | 'timer' | 'pomodoro')
    pub created_at: String, // ⇔ study_log.created_at (TEXT, ISO8601)
}

impl StudyEntry {
    /// Constructor for entries created by the CLI or the timer.
    /// `id = 0` until the row is inserted.
    pub fn new(date: NaiveDate, subject: &str, minutes: i64, source: &str) -> Self {
        Self {
            id: 0,
            date,
            subject: subject.to_string(),
            minutes,
            source: source.to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
