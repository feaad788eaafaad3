use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::mins2readable;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        subject,
        minutes,
        date: date_str,
    } = cmd
    {
        let d = match date_str {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let entry = AddLogic::apply(&mut pool, d, subject, *minutes)?;

        success(format!(
            "Logged {} of {} on {}",
            mins2readable(entry.minutes, false),
            entry.subject,
            entry.date_str()
        ));
    }
    Ok(())
}
