use crate::errors::{AppError, AppResult};
use crate::models::entry::StudyEntry;
use chrono::NaiveDate;
use rusqlite::{Connection, Result, Row, params};

pub fn map_row(row: &Row) -> Result<StudyEntry> {
    let date_str: String = row.get("date")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(StudyEntry {
        id: row.get("id")?,
        date,
        subject: row.get("subject")?,
        minutes: row.get("minutes")?,
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_entry(conn: &Connection, entry: &StudyEntry) -> AppResult<()> {
    conn.execute(
        "INSERT INTO study_log (date, subject, minutes, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            entry.date_str(),
            entry.subject,
            entry.minutes,
            entry.source,
            entry.created_at,
        ],
    )?;
    Ok(())
}

/// All entries, oldest first.
pub fn load_all_entries(conn: &Connection) -> AppResult<Vec<StudyEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM study_log
         ORDER BY date ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Entries with `date` in the inclusive [start, end] window, optionally
/// restricted to one subject.
pub fn load_entries_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
    subject: Option<&str>,
) -> AppResult<Vec<StudyEntry>> {
    let start_str = start.format("%Y-%m-%d").to_string();
    let end_str = end.format("%Y-%m-%d").to_string();

    let mut out = Vec::new();

    match subject {
        None => {
            let mut stmt = conn.prepare(
                "SELECT * FROM study_log
                 WHERE date BETWEEN ?1 AND ?2
                 ORDER BY date ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![start_str, end_str], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        Some(s) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM study_log
                 WHERE date BETWEEN ?1 AND ?2 AND subject = ?3
                 ORDER BY date ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![start_str, end_str, s], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

/// Sum of logged minutes in the inclusive [start, end] window.
/// `subject = None` skips the subject filter (the "All" sentinel).
/// Zero matching rows yields 0, not an error.
pub fn sum_minutes_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
    subject: Option<&str>,
) -> AppResult<i64> {
    let start_str = start.format("%Y-%m-%d").to_string();
    let end_str = end.format("%Y-%m-%d").to_string();

    let total: Option<i64> = match subject {
        None => conn.query_row(
            "SELECT SUM(minutes) FROM study_log WHERE date BETWEEN ?1 AND ?2",
            params![start_str, end_str],
            |row| row.get(0),
        )?,
        Some(s) => conn.query_row(
            "SELECT SUM(minutes) FROM study_log
             WHERE date BETWEEN ?1 AND ?2 AND subject = ?3",
            params![start_str, end_str, s],
            |row| row.get(0),
        )?,
    };

    Ok(total.unwrap_or(0))
}

/// Delete one entry by id. Returns false when no row matched.
pub fn delete_entry(conn: &Connection, id: i32) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM study_log WHERE id = ?1", [id])?;
    Ok(n > 0)
}
