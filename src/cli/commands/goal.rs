use crate::cli::commands::ask_confirmation;
use crate::cli::parser::{Commands, GoalCommands};
use crate::config::Config;
use crate::core::goal::GoalLogic;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::goal_type::GoalType;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{RESET, color_for_progress};
use crate::utils::date;
use crate::utils::mins2readable;
use crate::utils::table::Table;
use chrono::NaiveDate;

fn parse_goal_type(s: &str) -> AppResult<GoalType> {
    GoalType::from_db_str(s).ok_or_else(|| AppError::InvalidGoalType(s.to_string()))
}

fn parse_reference(date: &Option<String>) -> AppResult<NaiveDate> {
    match date {
        Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone())),
        None => Ok(date::today()),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Goal { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        GoalCommands::Set {
            goal_type,
            subject,
            target,
            date: date_str,
            notes,
        } => {
            let gt = parse_goal_type(goal_type)?;
            let reference = parse_reference(date_str)?;

            let goal = GoalLogic::set(&mut pool, gt, subject, reference, *target, notes)?;
            success(format!(
                "{} goal for {} from {}: {}",
                goal.goal_type.label(),
                goal.subject,
                goal.start_date.format("%Y-%m-%d"),
                mins2readable(goal.target_minutes, false)
            ));
        }

        GoalCommands::List => {
            let goals = db::goals::load_goals(&pool.conn)?;
            if goals.is_empty() {
                warning("No goals set.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "Type", "Subject", "From", "Target", "Progress"]);
            for g in &goals {
                let progress =
                    GoalLogic::progress(&pool.conn, g.goal_type, &g.subject, g.start_date)?;
                let progress_cell = match progress {
                    Some(p) => format!("{} ({:.0}%)", mins2readable(p.progress_minutes, true), p.percent()),
                    None => "-".to_string(),
                };

                table.add_row(vec![
                    g.id.to_string(),
                    g.goal_type.label().to_string(),
                    g.subject.clone(),
                    g.start_date.format("%Y-%m-%d").to_string(),
                    mins2readable(g.target_minutes, true),
                    progress_cell,
                ]);
            }
            println!("\n{}", table.render());
        }

        GoalCommands::Del { id, yes } => {
            let prompt = format!("Delete goal #{}? This action is irreversible.", id);
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            if GoalLogic::delete(&mut pool, *id)? {
                success(format!("Goal #{} has been deleted.", id));
            } else {
                warning(format!("No goal with id {}.", id));
            }
        }

        GoalCommands::Progress {
            goal_type,
            subject,
            date: date_str,
        } => {
            let gt = parse_goal_type(goal_type)?;
            let reference = parse_reference(date_str)?;

            match GoalLogic::resolve_progress(&pool.conn, gt, subject, reference)? {
                None => warning(format!(
                    "No {} goal covers {} for {}.",
                    gt.label().to_lowercase(),
                    reference.format("%Y-%m-%d"),
                    subject
                )),
                Some(p) => {
                    let color = color_for_progress(p.percent());
                    println!(
                        "\n{} goal for {} ({} to {}):",
                        gt.label(),
                        subject,
                        gt.period_start(reference).format("%Y-%m-%d"),
                        gt.period_end(reference).format("%Y-%m-%d")
                    );
                    println!(
                        "  {} / {}  {}{:.1}%{}\n",
                        mins2readable(p.progress_minutes, false),
                        mins2readable(p.target_minutes, false),
                        color,
                        p.percent(),
                        RESET
                    );
                }
            }
        }
    }

    Ok(())
}
