//! Goal engine: targets per period and progress against logged time.
//!
//! Progress is always recomputed from `study_log` at read time; nothing
//! is cached when entries are added or deleted.

use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::goal::{ALL_SUBJECTS, Goal, GoalProgress};
use crate::models::goal_type::GoalType;
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct GoalLogic;

impl GoalLogic {
    /// Create or replace the goal for (goal_type, subject, period).
    /// `reference` may be any day inside the period; the row is anchored
    /// at the period start so repeated sets hit the same row.
    pub fn set(
        pool: &mut DbPool,
        goal_type: GoalType,
        subject: &str,
        reference: NaiveDate,
        target_minutes: i64,
        notes: &str,
    ) -> AppResult<Goal> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(AppError::EmptySubject);
        }
        if target_minutes <= 0 {
            return Err(AppError::InvalidTarget(target_minutes));
        }

        let start_date = goal_type.period_start(reference);
        db::goals::upsert_goal(
            &pool.conn,
            goal_type,
            subject,
            start_date,
            target_minutes,
            notes,
        )?;

        db::log::audit(
            &pool.conn,
            "goal_set",
            subject,
            &format!(
                "{} goal from {}: {} min",
                goal_type.label(),
                start_date.format("%Y-%m-%d"),
                target_minutes
            ),
        )?;

        // the upsert may have updated an existing row; read it back for the id
        let goal = db::goals::get_goal(&pool.conn, goal_type, subject, start_date)?
            .ok_or_else(|| AppError::Other("Goal vanished after upsert".to_string()))?;
        Ok(goal)
    }

    /// Progress of the goal whose period contains `reference`.
    /// Returns None when no such goal exists (absence is not 0%).
    pub fn progress(
        conn: &Connection,
        goal_type: GoalType,
        subject: &str,
        reference: NaiveDate,
    ) -> AppResult<Option<GoalProgress>> {
        let start = goal_type.period_start(reference);
        let Some(goal) = db::goals::get_goal(conn, goal_type, subject, start)? else {
            return Ok(None);
        };

        let end = goal_type.period_end(reference);
        // the All sentinel sums every subject
        let filter = if subject == ALL_SUBJECTS {
            None
        } else {
            Some(subject)
        };
        let progress_minutes = db::queries::sum_minutes_between(conn, start, end, filter)?;

        Ok(Some(GoalProgress {
            target_minutes: goal.target_minutes,
            progress_minutes,
        }))
    }

    /// Progress for a subject, falling back to the All goal when no
    /// subject-specific goal covers the period.
    pub fn resolve_progress(
        conn: &Connection,
        goal_type: GoalType,
        subject: &str,
        reference: NaiveDate,
    ) -> AppResult<Option<GoalProgress>> {
        if subject != ALL_SUBJECTS {
            if let Some(p) = Self::progress(conn, goal_type, subject, reference)? {
                return Ok(Some(p));
            }
        }
        Self::progress(conn, goal_type, ALL_SUBJECTS, reference)
    }

    pub fn delete(pool: &mut DbPool, id: i32) -> AppResult<bool> {
        let deleted = db::goals::delete_goal(&pool.conn, id)?;
        if deleted {
            db::log::audit(&pool.conn, "goal_del", &id.to_string(), "Deleted goal")?;
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use crate::models::entry::StudyEntry;

    fn test_pool() -> DbPool {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        DbPool { conn }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn log(pool: &DbPool, date: &str, subject: &str, minutes: i64) {
        let entry = StudyEntry::new(d(date), subject, minutes, "manual");
        db::queries::insert_entry(&pool.conn, &entry).unwrap();
    }

    #[test]
    fn absent_goal_is_none_not_zero() {
        let pool = test_pool();
        log(&pool, "2026-08-19", "Math", 60);

        let p = GoalLogic::progress(&pool.conn, GoalType::Daily, "Math", d("2026-08-19")).unwrap();
        assert!(p.is_none());
    }

    #[test]
    fn set_twice_updates_the_same_period_row() {
        let mut pool = test_pool();
        // Wednesday and Friday of the same week anchor at the same Monday
        GoalLogic::set(&mut pool, GoalType::Weekly, "Math", d("2026-08-19"), 300, "").unwrap();
        GoalLogic::set(&mut pool, GoalType::Weekly, "Math", d("2026-08-21"), 600, "").unwrap();

        let goals = db::goals::load_goals(&pool.conn).unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].target_minutes, 600);
        assert_eq!(goals[0].start_date, d("2026-08-17"));
    }

    #[test]
    fn daily_progress_counts_only_that_day_and_subject() {
        let mut pool = test_pool();
        GoalLogic::set(&mut pool, GoalType::Daily, "Math", d("2026-08-19"), 120, "").unwrap();

        log(&pool, "2026-08-19", "Math", 50);
        log(&pool, "2026-08-19", "English", 40); // other subject
        log(&pool, "2026-08-18", "Math", 30); // other day

        let p = GoalLogic::progress(&pool.conn, GoalType::Daily, "Math", d("2026-08-19"))
            .unwrap()
            .unwrap();
        assert_eq!(p.target_minutes, 120);
        assert_eq!(p.progress_minutes, 50);
    }

    #[test]
    fn weekly_all_goal_sums_every_subject_in_the_window() {
        let mut pool = test_pool();
        GoalLogic::set(
            &mut pool,
            GoalType::Weekly,
            ALL_SUBJECTS,
            d("2026-08-19"),
            600,
            "",
        )
        .unwrap();

        log(&pool, "2026-08-17", "Math", 100); // Monday, in window
        log(&pool, "2026-08-23", "English", 200); // Sunday, in window
        log(&pool, "2026-08-24", "Math", 500); // next Monday, excluded
        log(&pool, "2026-08-16", "Math", 500); // previous Sunday, excluded

        let p = GoalLogic::progress(&pool.conn, GoalType::Weekly, ALL_SUBJECTS, d("2026-08-20"))
            .unwrap()
            .unwrap();
        assert_eq!(p.progress_minutes, 300);
        assert_eq!(p.percent(), 50.0);
    }

    #[test]
    fn subject_without_goal_falls_back_to_all() {
        let mut pool = test_pool();
        GoalLogic::set(
            &mut pool,
            GoalType::Daily,
            ALL_SUBJECTS,
            d("2026-08-19"),
            100,
            "",
        )
        .unwrap();
        log(&pool, "2026-08-19", "Physics", 80);

        let p = GoalLogic::resolve_progress(&pool.conn, GoalType::Daily, "Physics", d("2026-08-19"))
            .unwrap()
            .unwrap();
        // fallback uses the All goal, so all subjects count
        assert_eq!(p.target_minutes, 100);
        assert_eq!(p.progress_minutes, 80);
    }

    #[test]
    fn progress_can_exceed_one_hundred_percent() {
        let mut pool = test_pool();
        GoalLogic::set(&mut pool, GoalType::Daily, "Math", d("2026-08-19"), 60, "").unwrap();
        log(&pool, "2026-08-19", "Math", 90);

        let p = GoalLogic::progress(&pool.conn, GoalType::Daily, "Math", d("2026-08-19"))
            .unwrap()
            .unwrap();
        assert_eq!(p.percent(), 150.0);
    }
}
