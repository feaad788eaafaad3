use crate::cli::commands::ask_confirmation;
use crate::cli::parser::{Commands, ExamGoalCommands};
use crate::config::Config;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::exam_goal::{ExamGoal, ExamGoalStatus};
use crate::ui::messages::{info, success, warning};
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Examgoal { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    match action {
        ExamGoalCommands::Add {
            subject,
            name,
            date: date_str,
            target,
            notes,
        } => {
            let d = date::parse_date(date_str)
                .ok_or_else(|| AppError::InvalidDate(date_str.clone()))?;
            let subject = subject.trim();
            if subject.is_empty() {
                return Err(AppError::EmptySubject);
            }
            if *target <= 0 {
                return Err(AppError::InvalidScore(*target));
            }

            let goal = ExamGoal {
                id: 0,
                subject: subject.to_string(),
                exam_name: name.clone(),
                exam_date: d,
                target_score: *target,
                status: ExamGoalStatus::Active,
                notes: notes.clone(),
            };
            db::exams::insert_exam_goal(&pool.conn, &goal)?;
            success(format!(
                "Target {} set for {} ({}) on {}.",
                target, name, subject, date_str
            ));
        }

        ExamGoalCommands::List => {
            let goals = db::exams::load_exam_goals(&pool.conn)?;
            if goals.is_empty() {
                info("No exam goals set.");
                return Ok(());
            }

            let mut table =
                Table::new(&["ID", "Date", "Subject", "Exam", "Target", "Status", "Notes"]);
            for g in &goals {
                table.add_row(vec![
                    g.id.to_string(),
                    g.exam_date.format("%Y-%m-%d").to_string(),
                    g.subject.clone(),
                    g.exam_name.clone(),
                    g.target_score.to_string(),
                    g.status.to_db_str().to_string(),
                    g.notes.clone(),
                ]);
            }
            println!("\n{}", table.render());
        }

        ExamGoalCommands::Status { id, status } => {
            let parsed = ExamGoalStatus::from_cli_str(status)
                .ok_or_else(|| AppError::InvalidStatus(status.clone()))?;

            if db::exams::update_exam_goal_status(&pool.conn, *id, parsed)? {
                success(format!(
                    "Exam goal #{} is now '{}'.",
                    id,
                    parsed.to_db_str()
                ));
            } else {
                warning(format!("No exam goal with id {}.", id));
            }
        }

        ExamGoalCommands::Del { id, yes } => {
            let prompt = format!("Delete exam goal #{}? This action is irreversible.", id);
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            if db::exams::delete_exam_goal(&pool.conn, *id)? {
                success(format!("Exam goal #{} has been deleted.", id));
            } else {
                warning(format!("No exam goal with id {}.", id));
            }
        }
    }

    Ok(())
}
