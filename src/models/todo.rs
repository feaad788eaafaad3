use serde::Serialize;

/// Legacy task-list row, kept from the earliest schema.
#[derive(Debug, Clone, Serialize)]
pub struct Todo {
    pub id: i32,
    pub task: String,
    pub is_done: bool,
}
