use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { end, output } = cmd {
        let end_date = match end {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        let mut pool = DbPool::new(&cfg.database)?;

        match ReportLogic::generate(&mut pool, end_date, output.as_deref())? {
            Some(path) => success(format!("Weekly report written to {}", path.display())),
            None => warning("No study data in the last 7 days; no report generated."),
        }
    }
    Ok(())
}
