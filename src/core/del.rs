use crate::db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete one study-log entry by id. Returns false when nothing matched.
    pub fn apply(pool: &mut DbPool, id: i32) -> AppResult<bool> {
        let deleted = db::queries::delete_entry(&pool.conn, id)?;

        if deleted {
            db::log::audit(
                &pool.conn,
                "del",
                &id.to_string(),
                "Deleted study-log entry",
            )?;
        }

        Ok(deleted)
    }
}
