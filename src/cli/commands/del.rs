use crate::cli::commands::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let prompt = format!("Delete entry #{}? This action is irreversible.", id);
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut pool = DbPool::new(&cfg.database)?;

        if DeleteLogic::apply(&mut pool, *id)? {
            success(format!("Entry #{} has been deleted.", id));
        } else {
            warning(format!("No entry with id {}.", id));
        }
    }
    Ok(())
}
