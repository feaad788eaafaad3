use crate::errors::{AppError, AppResult};
use crate::models::goal::Goal;
use crate::models::goal_type::GoalType;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn map_row(row: &Row) -> Result<Goal> {
    let type_str: String = row.get("goal_type")?;
    let goal_type = GoalType::from_db_str(&type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidGoalType(type_str.clone())),
        )
    })?;

    let date_str: String = row.get("start_date")?;
    let start_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(Goal {
        id: row.get("id")?,
        goal_type,
        subject: row.get("subject")?,
        start_date,
        target_minutes: row.get("target_minutes")?,
        notes: row.get("notes")?,
    })
}

/// Insert or update the goal for (goal_type, subject, start_date).
/// An existing row keeps its id; target and notes are overwritten.
pub fn upsert_goal(
    conn: &Connection,
    goal_type: GoalType,
    subject: &str,
    start_date: NaiveDate,
    target_minutes: i64,
    notes: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO goals (goal_type, subject, start_date, target_minutes, notes)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(goal_type, subject, start_date) DO UPDATE SET
             target_minutes = excluded.target_minutes,
             notes = excluded.notes",
        params![
            goal_type.to_db_str(),
            subject,
            start_date.format("%Y-%m-%d").to_string(),
            target_minutes,
            notes,
        ],
    )?;
    Ok(())
}

/// Look up the goal anchored at `start_date`. Absence is a normal
/// result, not an error.
pub fn get_goal(
    conn: &Connection,
    goal_type: GoalType,
    subject: &str,
    start_date: NaiveDate,
) -> AppResult<Option<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM goals
         WHERE goal_type = ?1 AND subject = ?2 AND start_date = ?3",
    )?;

    let goal = stmt
        .query_row(
            params![
                goal_type.to_db_str(),
                subject,
                start_date.format("%Y-%m-%d").to_string()
            ],
            map_row,
        )
        .optional()?;

    Ok(goal)
}

pub fn load_goals(conn: &Connection) -> AppResult<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM goals
         ORDER BY start_date DESC, goal_type ASC, subject ASC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_goal(conn: &Connection, id: i32) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM goals WHERE id = ?1", [id])?;
    Ok(n > 0)
}
