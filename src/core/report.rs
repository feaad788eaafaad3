//! Weekly report: collect the last seven days of study time and render
//! a one-page PDF summary.

use crate::core::goal::GoalLogic;
use crate::core::stats::{day_totals, subject_totals};
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::pdf::PdfManager;
use crate::models::entry::StudyEntry;
use crate::models::goal::{ALL_SUBJECTS, GoalProgress};
use crate::models::goal_type::GoalType;
use crate::utils::date::last_seven_days;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Everything the PDF needs, computed up front so rendering is pure.
pub struct WeeklyReportData {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub entries: Vec<StudyEntry>,
    pub subject_totals: Vec<(String, i64)>,
    pub day_totals: Vec<(NaiveDate, i64)>,
    pub total_minutes: i64,
    /// This week's "All" weekly goal, when one exists.
    pub weekly_goal: Option<GoalProgress>,
}

pub struct ReportLogic;

impl ReportLogic {
    /// Gather report data for the 7-day window ending at `end`.
    /// Returns None when the window holds no entries at all.
    pub fn collect(conn: &Connection, end: NaiveDate) -> AppResult<Option<WeeklyReportData>> {
        let (start, end) = last_seven_days(end);
        let entries = db::queries::load_entries_between(conn, start, end, None)?;

        if entries.is_empty() {
            return Ok(None);
        }

        let by_subject = subject_totals(&entries);
        let by_day = day_totals(&entries, start, end);
        let total_minutes = by_subject.iter().map(|(_, m)| m).sum();
        let weekly_goal = GoalLogic::progress(conn, GoalType::Weekly, ALL_SUBJECTS, end)?;

        Ok(Some(WeeklyReportData {
            start,
            end,
            entries,
            subject_totals: by_subject,
            day_totals: by_day,
            total_minutes,
            weekly_goal,
        }))
    }

    pub fn filename(end: NaiveDate) -> String {
        format!("Weekly_Report_{}.pdf", end.format("%Y-%m-%d"))
    }

    /// Collect and render. Returns the written path, or None when there
    /// was no data to report on.
    pub fn generate(
        pool: &mut DbPool,
        end: NaiveDate,
        output_dir: Option<&str>,
    ) -> AppResult<Option<PathBuf>> {
        let Some(data) = Self::collect(&pool.conn, end)? else {
            return Ok(None);
        };

        let dir = output_dir.map(Path::new).unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;
        let path = dir.join(Self::filename(end));

        PdfManager::write_report(&data, &path)?;

        db::log::audit(
            &pool.conn,
            "report",
            &path.to_string_lossy(),
            "Weekly report generated",
        )?;

        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        conn
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn log(conn: &Connection, date: &str, subject: &str, minutes: i64) {
        let entry = StudyEntry::new(d(date), subject, minutes, "manual");
        db::queries::insert_entry(conn, &entry).unwrap();
    }

    #[test]
    fn empty_window_yields_no_report() {
        let conn = test_conn();
        // data exists, but outside the window
        log(&conn, "2026-08-01", "Math", 60);
        let data = ReportLogic::collect(&conn, d("2026-08-28")).unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn window_is_seven_days_inclusive() {
        let conn = test_conn();
        log(&conn, "2026-08-22", "Math", 10); // first day in window
        log(&conn, "2026-08-28", "Math", 20); // last day
        log(&conn, "2026-08-21", "Math", 99); // one day too early

        let data = ReportLogic::collect(&conn, d("2026-08-28")).unwrap().unwrap();
        assert_eq!(data.start, d("2026-08-22"));
        assert_eq!(data.end, d("2026-08-28"));
        assert_eq!(data.total_minutes, 30);
        assert_eq!(data.entries.len(), 2);
        // one bucket per day, even without data
        assert_eq!(data.day_totals.len(), 7);
    }

    #[test]
    fn weekly_goal_is_attached_when_present() {
        let conn = test_conn();
        log(&conn, "2026-08-26", "Math", 120);

        let mut pool = DbPool { conn };
        GoalLogic::set(
            &mut pool,
            GoalType::Weekly,
            ALL_SUBJECTS,
            d("2026-08-28"),
            600,
            "",
        )
        .unwrap();

        let data = ReportLogic::collect(&pool.conn, d("2026-08-28")).unwrap().unwrap();
        let goal = data.weekly_goal.unwrap();
        assert_eq!(goal.target_minutes, 600);
        assert_eq!(goal.progress_minutes, 120);
    }

    #[test]
    fn filename_carries_the_end_date() {
        assert_eq!(
            ReportLogic::filename(d("2026-08-28")),
            "Weekly_Report_2026-08-28.pdf"
        );
    }
}
