use crate::errors::AppResult;
use crate::models::todo::Todo;
use rusqlite::{Connection, Result, Row, params};

fn map_row(row: &Row) -> Result<Todo> {
    Ok(Todo {
        id: row.get("id")?,
        task: row.get("task")?,
        is_done: row.get::<_, i32>("is_done")? != 0,
    })
}

pub fn add_todo(conn: &Connection, task: &str) -> AppResult<()> {
    conn.execute("INSERT INTO todos (task) VALUES (?1)", [task])?;
    Ok(())
}

pub fn load_todos(conn: &Connection) -> AppResult<Vec<Todo>> {
    let mut stmt = conn.prepare("SELECT * FROM todos ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Flip the done flag. Returns the new value, or None when the id
/// does not exist.
pub fn toggle_todo(conn: &Connection, id: i32) -> AppResult<Option<bool>> {
    let todos = {
        let mut stmt = conn.prepare("SELECT * FROM todos WHERE id = ?1")?;
        let rows = stmt.query_map([id], map_row)?;
        let mut v = Vec::new();
        for r in rows {
            v.push(r?);
        }
        v
    };

    let Some(todo) = todos.into_iter().next() else {
        return Ok(None);
    };

    let new_status = !todo.is_done;
    conn.execute(
        "UPDATE todos SET is_done = ?1 WHERE id = ?2",
        params![if new_status { 1 } else { 0 }, id],
    )?;

    Ok(Some(new_status))
}

pub fn delete_todo(conn: &Connection, id: i32) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM todos WHERE id = ?1", [id])?;
    Ok(n > 0)
}
