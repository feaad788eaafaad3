use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::StudyEntry;
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use crate::utils::mins2readable;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, subject } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        let entries: Vec<StudyEntry> = match period {
            Some(p) => {
                let (start, end) = parse_period(p).map_err(AppError::InvalidDate)?;
                db::queries::load_entries_between(&pool.conn, start, end, subject.as_deref())?
            }
            None => {
                let all = db::queries::load_all_entries(&pool.conn)?;
                match subject {
                    Some(s) => all.into_iter().filter(|e| &e.subject == s).collect(),
                    None => all,
                }
            }
        };

        if entries.is_empty() {
            warning("No entries found.");
            return Ok(());
        }

        let mut table = Table::new(&["ID", "Date", "Subject", "Time", "Source"]);
        let mut total = 0;
        for e in &entries {
            total += e.minutes;
            table.add_row(vec![
                e.id.to_string(),
                e.date_str(),
                e.subject.clone(),
                mins2readable(e.minutes, true),
                e.source.clone(),
            ]);
        }

        println!("\n{}", table.render());
        println!(
            "{} entries, total {}\n",
            entries.len(),
            mins2readable(total, false)
        );
    }
    Ok(())
}
