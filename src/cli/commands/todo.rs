use crate::cli::commands::ask_confirmation;
use crate::cli::parser::{Commands, TodoCommands};
use crate::config::Config;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Todo { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    match action {
        TodoCommands::Add { task } => {
            let task = task.trim();
            if task.is_empty() {
                return Err(AppError::Other("Task must not be empty".to_string()));
            }
            db::todos::add_todo(&pool.conn, task)?;
            success(format!("Task added: {}", task));
        }

        TodoCommands::List => {
            let todos = db::todos::load_todos(&pool.conn)?;
            if todos.is_empty() {
                info("Nothing to do.");
                return Ok(());
            }

            println!();
            for t in &todos {
                let mark = if t.is_done { "[x]" } else { "[ ]" };
                println!("  {:>3}. {} {}", t.id, mark, t.task);
            }
            println!();
        }

        TodoCommands::Toggle { id } => match db::todos::toggle_todo(&pool.conn, *id)? {
            Some(true) => success(format!("Task #{} marked done.", id)),
            Some(false) => info(format!("Task #{} marked not done.", id)),
            None => warning(format!("No task with id {}.", id)),
        },

        TodoCommands::Del { id, yes } => {
            let prompt = format!("Delete task #{}? This action is irreversible.", id);
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            if db::todos::delete_todo(&pool.conn, *id)? {
                success(format!("Task #{} has been deleted.", id));
            } else {
                warning(format!("No task with id {}.", id));
            }
        }
    }

    Ok(())
}
