use crate::errors::{AppError, AppResult};
use crate::models::exam_goal::{ExamGoal, ExamGoalStatus};
use crate::models::mock_exam::MockExam;
use chrono::NaiveDate;
use rusqlite::{Connection, Result, Row, params};

fn parse_db_date(date_str: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str)),
        )
    })
}

fn map_exam_row(row: &Row) -> Result<MockExam> {
    Ok(MockExam {
        id: row.get("id")?,
        date: parse_db_date(row.get("date")?)?,
        subject: row.get("subject")?,
        exam_name: row.get("exam_name")?,
        // nullable columns stay Option, blank input is NULL not zero
        score: row.get("score")?,
        max_score: row.get("max_score")?,
        deviation_value: row.get("deviation_value")?,
    })
}

fn map_goal_row(row: &Row) -> Result<ExamGoal> {
    let status_str: String = row.get("status")?;
    let status = ExamGoalStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(ExamGoal {
        id: row.get("id")?,
        subject: row.get("subject")?,
        exam_name: row.get("exam_name")?,
        exam_date: parse_db_date(row.get("exam_date")?)?,
        target_score: row.get("target_score")?,
        status,
        notes: row.get("notes")?,
    })
}

// ---------------------------
// Mock exams
// ---------------------------

pub fn insert_mock_exam(conn: &Connection, exam: &MockExam) -> AppResult<()> {
    conn.execute(
        "INSERT INTO mock_exams (date, subject, exam_name, score, max_score, deviation_value)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            exam.date_str(),
            exam.subject,
            exam.exam_name,
            exam.score,
            exam.max_score,
            exam.deviation_value,
        ],
    )?;
    Ok(())
}

pub fn load_mock_exams(conn: &Connection) -> AppResult<Vec<MockExam>> {
    let mut stmt = conn.prepare("SELECT * FROM mock_exams ORDER BY date DESC, id DESC")?;
    let rows = stmt.query_map([], map_exam_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_mock_exam(conn: &Connection, id: i32) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM mock_exams WHERE id = ?1", [id])?;
    Ok(n > 0)
}

// ---------------------------
// Exam goals
// ---------------------------

pub fn insert_exam_goal(conn: &Connection, goal: &ExamGoal) -> AppResult<()> {
    conn.execute(
        "INSERT INTO mock_exam_goals (subject, exam_name, exam_date, target_score, status, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            goal.subject,
            goal.exam_name,
            goal.exam_date.format("%Y-%m-%d").to_string(),
            goal.target_score,
            goal.status.to_db_str(),
            goal.notes,
        ],
    )?;
    Ok(())
}

pub fn load_exam_goals(conn: &Connection) -> AppResult<Vec<ExamGoal>> {
    let mut stmt = conn.prepare("SELECT * FROM mock_exam_goals ORDER BY exam_date ASC, id ASC")?;
    let rows = stmt.query_map([], map_goal_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Explicit status update; the only mutation allowed on an exam goal.
pub fn update_exam_goal_status(
    conn: &Connection,
    id: i32,
    status: ExamGoalStatus,
) -> AppResult<bool> {
    let n = conn.execute(
        "UPDATE mock_exam_goals SET status = ?1 WHERE id = ?2",
        params![status.to_db_str(), id],
    )?;
    Ok(n > 0)
}

pub fn delete_exam_goal(conn: &Connection, id: i32) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM mock_exam_goals WHERE id = ?1", [id])?;
    Ok(n > 0)
}
