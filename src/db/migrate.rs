use crate::ui::messages::{success, warning};
use crate::utils::date;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It must be first: every other
/// migration records its application here.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Has this versioned migration already been applied?
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Additive column migration: attempt to add, skip when already present.
fn add_column_if_missing(
    conn: &Connection,
    version: &str,
    table: &str,
    column: &str,
    decl: &str,
) -> Result<()> {
    if migration_applied(conn, version)? || has_column(conn, table, column)? {
        return Ok(());
    }

    conn.execute(
        &format!("ALTER TABLE {} ADD COLUMN {} {};", table, column, decl),
        [],
    )?;

    mark_migration(
        conn,
        version,
        &format!("Added '{}' to {} table", column, table),
    )?;
    success(format!(
        "Migration applied: {} → added '{}' to {} table",
        version, column, table
    ));

    Ok(())
}

fn create_study_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS study_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL,
            subject     TEXT NOT NULL,
            minutes     INTEGER NOT NULL CHECK(minutes > 0),
            source      TEXT NOT NULL DEFAULT 'manual',
            created_at  TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_study_log_date ON study_log(date);
        CREATE INDEX IF NOT EXISTS idx_study_log_subject ON study_log(subject);
        "#,
    )?;
    Ok(())
}

/// Create the `goals` table with the modern per-period schema:
/// one row per (goal_type, subject, start_date), upserted on conflict.
fn create_goals_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS goals (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            goal_type       TEXT NOT NULL CHECK(goal_type IN ('daily','weekly')),
            subject         TEXT NOT NULL,
            start_date      TEXT NOT NULL,
            target_minutes  INTEGER NOT NULL CHECK(target_minutes > 0),
            notes           TEXT DEFAULT '',
            UNIQUE(goal_type, subject, start_date)
        );
        "#,
    )?;
    Ok(())
}

/// Migrate a legacy `goals` table (standing per-subject targets, no
/// `start_date`) into the dated per-period schema. Legacy rows are
/// anchored at the current period: today for daily goals, this week's
/// Monday for weekly goals.
fn migrate_goals_to_dated_schema(conn: &Connection) -> Result<()> {
    if !table_exists(conn, "goals")? {
        return Ok(());
    }

    if has_column(conn, "goals", "start_date")? {
        return Ok(());
    }

    warning("Legacy goals schema detected, rebuilding with per-period targets...");

    let today = date::today().format("%Y-%m-%d").to_string();
    let monday = date::monday_of_week(date::today())
        .format("%Y-%m-%d")
        .to_string();

    conn.execute_batch("BEGIN; ALTER TABLE goals RENAME TO goals_old;")?;
    create_goals_table(conn)?;
    conn.execute(
        "INSERT INTO goals (goal_type, subject, start_date, target_minutes, notes)
         SELECT goal_type, subject, ?1, target_minutes, ''
         FROM goals_old WHERE goal_type = 'daily'",
        [&today],
    )?;
    conn.execute(
        "INSERT INTO goals (goal_type, subject, start_date, target_minutes, notes)
         SELECT goal_type, subject, ?1, target_minutes, ''
         FROM goals_old WHERE goal_type = 'weekly'",
        [&monday],
    )?;
    conn.execute_batch("DROP TABLE goals_old; COMMIT;")?;

    mark_migration(
        conn,
        "20250412_0003_goals_per_period",
        "Rebuilt goals with (goal_type, subject, start_date) uniqueness",
    )?;
    success("Goals table rebuilt (per-period schema).");

    Ok(())
}

fn create_todos_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            task     TEXT NOT NULL,
            is_done  INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )?;
    Ok(())
}

fn create_exam_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS mock_exams (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            date             TEXT NOT NULL,
            subject          TEXT NOT NULL,
            exam_name        TEXT NOT NULL,
            score            INTEGER,
            max_score        INTEGER
        );

        CREATE TABLE IF NOT EXISTS mock_exam_goals (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            subject       TEXT NOT NULL,
            exam_name     TEXT NOT NULL,
            exam_date     TEXT NOT NULL,
            target_score  INTEGER NOT NULL CHECK(target_score > 0),
            status        TEXT NOT NULL DEFAULT 'Active'
        );
        "#,
    )?;
    Ok(())
}

/// Timer state is persisted between CLI invocations as a serialized blob.
fn create_state_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS state (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and `db --migrate`. Safe to run repeatedly:
/// every step is create-if-missing, column-if-missing, or guarded by a
/// version tag in the `log` table.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Audit log first, migrations record themselves there
    ensure_log_table(conn)?;

    // 2) Core tables
    create_study_log_table(conn)?;

    if !table_exists(conn, "goals")? {
        create_goals_table(conn)?;
    } else {
        migrate_goals_to_dated_schema(conn)?;
    }

    create_todos_table(conn)?;
    create_exam_tables(conn)?;
    create_state_table(conn)?;

    // 3) Additive column migrations
    add_column_if_missing(
        conn,
        "20250118_0001_study_log_source",
        "study_log",
        "source",
        "TEXT NOT NULL DEFAULT 'manual'",
    )?;
    add_column_if_missing(
        conn,
        "20250118_0002_study_log_created_at",
        "study_log",
        "created_at",
        "TEXT NOT NULL DEFAULT ''",
    )?;
    add_column_if_missing(
        conn,
        "20250530_0004_mock_exams_deviation",
        "mock_exams",
        "deviation_value",
        "REAL",
    )?;
    add_column_if_missing(
        conn,
        "20250530_0005_exam_goals_notes",
        "mock_exam_goals",
        "notes",
        "TEXT DEFAULT ''",
    )?;

    Ok(())
}
