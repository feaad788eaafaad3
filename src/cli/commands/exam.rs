use crate::cli::commands::ask_confirmation;
use crate::cli::parser::{Commands, ExamCommands};
use crate::config::Config;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::mock_exam::MockExam;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREY, RESET};
use crate::utils::date;
use crate::utils::table::Table;

fn opt_cell<T: ToString>(v: &Option<T>) -> String {
    v.as_ref().map(|x| x.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Exam { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    match action {
        ExamCommands::Add {
            date: date_str,
            subject,
            name,
            score,
            max_score,
            deviation,
        } => {
            let d = date::parse_date(date_str)
                .ok_or_else(|| AppError::InvalidDate(date_str.clone()))?;
            let subject = subject.trim();
            if subject.is_empty() {
                return Err(AppError::EmptySubject);
            }
            if let Some(s) = score {
                if *s < 0 {
                    return Err(AppError::InvalidScore(*s));
                }
            }

            let exam = MockExam {
                id: 0,
                date: d,
                subject: subject.to_string(),
                exam_name: name.clone(),
                score: *score,
                max_score: *max_score,
                deviation_value: *deviation,
            };
            db::exams::insert_mock_exam(&pool.conn, &exam)?;
            success(format!("Recorded {} ({}) on {}.", name, subject, date_str));
        }

        ExamCommands::List => {
            let exams = db::exams::load_mock_exams(&pool.conn)?;
            if exams.is_empty() {
                info("No mock exams recorded.");
                return Ok(());
            }

            let mut table =
                Table::new(&["ID", "Date", "Subject", "Exam", "Score", "Max", "Dev"]);
            for e in &exams {
                table.add_row(vec![
                    e.id.to_string(),
                    e.date_str(),
                    e.subject.clone(),
                    e.exam_name.clone(),
                    opt_cell(&e.score),
                    opt_cell(&e.max_score),
                    opt_cell(&e.deviation_value),
                ]);
            }
            println!("\n{}", table.render());
            println!("{}(- means not recorded){}\n", GREY, RESET);
        }

        ExamCommands::Del { id, yes } => {
            let prompt = format!("Delete mock exam #{}? This action is irreversible.", id);
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            if db::exams::delete_mock_exam(&pool.conn, *id)? {
                success(format!("Mock exam #{} has been deleted.", id));
            } else {
                warning(format!("No mock exam with id {}.", id));
            }
        }
    }

    Ok(())
}
