use crate::cli::commands::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        yes,
    } = cmd
    {
        let dest = expand_tilde(file);
        let dest_str = dest.to_string_lossy().to_string();

        let overwrite = if dest.exists() && !*yes {
            ask_confirmation(&format!(
                "The file '{}' already exists. Overwrite?",
                dest.display()
            ))
        } else {
            true
        };

        let mut pool = DbPool::new(&cfg.database)?;
        BackupLogic::backup(&mut pool, cfg, &dest_str, *compress, overwrite)?;
    }
    Ok(())
}
