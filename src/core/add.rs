use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::StudyEntry;
use chrono::NaiveDate;

pub struct AddLogic;

impl AddLogic {
    /// Validate and insert one manual study-log entry.
    pub fn apply(
        pool: &mut DbPool,
        date: NaiveDate,
        subject: &str,
        minutes: i64,
    ) -> AppResult<StudyEntry> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(AppError::EmptySubject);
        }
        if minutes <= 0 {
            return Err(AppError::InvalidMinutes(minutes));
        }

        let entry = StudyEntry::new(date, subject, minutes, "manual");
        db::queries::insert_entry(&pool.conn, &entry)?;

        db::log::audit(
            &pool.conn,
            "add",
            subject,
            &format!("Logged {} min on {}", minutes, entry.date_str()),
        )?;

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use rusqlite::Connection;

    fn test_pool() -> DbPool {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        DbPool { conn }
    }

    #[test]
    fn rejects_blank_subject_and_nonpositive_minutes() {
        let mut pool = test_pool();
        let d = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();

        assert!(matches!(
            AddLogic::apply(&mut pool, d, "   ", 30),
            Err(AppError::EmptySubject)
        ));
        assert!(matches!(
            AddLogic::apply(&mut pool, d, "Math", 0),
            Err(AppError::InvalidMinutes(0))
        ));
    }

    #[test]
    fn inserts_trimmed_subject() {
        let mut pool = test_pool();
        let d = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();

        let entry = AddLogic::apply(&mut pool, d, "  Math ", 45).unwrap();
        assert_eq!(entry.subject, "Math");

        let all = db::queries::load_all_entries(&pool.conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].minutes, 45);
        assert_eq!(all[0].source, "manual");
    }
}
