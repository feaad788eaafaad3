use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::StatsLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { period } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        StatsLogic::print(&mut pool, period.as_deref())?;
    }
    Ok(())
}
