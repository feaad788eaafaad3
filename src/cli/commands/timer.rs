use crate::cli::parser::{Commands, TimerCommands};
use crate::config::Config;
use crate::core::timer::{Durations, Effect, STATE_KEY, Session, Timer, TimerEvent};
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::StudyEntry;
use crate::ui::messages::{info, success};
use crate::utils::date;
use crate::utils::formatting::{secs2hhmmss, secs2mmss};
use crate::utils::mins2readable;
use chrono::Local;
use std::io::Write;

fn durations_from(cfg: &Config) -> Durations {
    Durations {
        work_minutes: cfg.work_minutes,
        short_break_minutes: cfg.short_break_minutes,
        long_break_minutes: cfg.long_break_minutes,
        cycles_per_set: cfg.cycles_per_set,
    }
}

/// Load the persisted timer, or a fresh idle one.
fn load_timer(pool: &DbPool, cfg: &Config) -> AppResult<Timer> {
    match db::state::kv_get(&pool.conn, STATE_KEY)? {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| AppError::Timer(format!("Corrupted timer state: {e}"))),
        None => Ok(Timer::new(&cfg.default_subject, false, durations_from(cfg))),
    }
}

fn save_timer(pool: &DbPool, timer: &Timer) -> AppResult<()> {
    let json = serde_json::to_string(timer)
        .map_err(|e| AppError::Timer(format!("Cannot serialize timer state: {e}")))?;
    db::state::kv_set(&pool.conn, STATE_KEY, &json)
}

/// Execute the effects produced by a transition.
fn run_effects(pool: &mut DbPool, timer: &Timer, effects: &[Effect]) -> AppResult<()> {
    for effect in effects {
        match effect {
            Effect::Bell => {
                print!("\x07");
                std::io::stdout().flush().ok();
            }
            Effect::Record { minutes, source } => {
                let entry = StudyEntry::new(date::today(), &timer.subject, *minutes, source);
                db::queries::insert_entry(&pool.conn, &entry)?;
                db::log::audit(
                    &pool.conn,
                    if *source == "pomodoro" {
                        "pomodoro"
                    } else {
                        "timer_save"
                    },
                    &timer.subject,
                    &format!("Recorded {} min", minutes),
                )?;
                success(format!(
                    "Recorded {} of {}.",
                    mins2readable(*minutes, false),
                    timer.subject
                ));
            }
        }
    }
    Ok(())
}

fn apply_and_persist(pool: &mut DbPool, timer: &mut Timer, event: TimerEvent) -> AppResult<()> {
    let effects = timer.apply(event, Local::now())?;
    run_effects(pool, timer, &effects)?;
    save_timer(pool, timer)
}

fn print_status(timer: &Timer) {
    let now = Local::now();
    match &timer.session {
        Session::Idle => info("Timer is idle."),
        Session::Running { .. } | Session::Paused { .. } | Session::Stopped { .. } => {
            println!(
                "⏱  {} [{}]: {}",
                timer.status_label(),
                timer.subject,
                secs2hhmmss(timer.elapsed_secs(now))
            );
        }
        Session::Countdown { .. } => {
            let remaining = timer.remaining_secs(now).unwrap_or(0);
            println!(
                "🍅 {} [{}]: {}",
                timer.status_label(),
                timer.subject,
                secs2mmss(remaining)
            );
        }
    }
}

/// Follow the timer with a once-per-second redraw. For Pomodoro sessions
/// this is what drives phase transitions; it returns when the session
/// chain ends.
fn watch(pool: &mut DbPool, timer: &mut Timer) -> AppResult<()> {
    loop {
        let now = Local::now();

        match &timer.session {
            Session::Idle => {
                println!();
                info("Timer is idle.");
                return Ok(());
            }
            Session::Countdown { .. } => {
                let remaining = timer.remaining_secs(now).unwrap_or(0);
                print!(
                    "\r🍅 {} [{}]: {}   ",
                    timer.status_label(),
                    timer.subject,
                    secs2mmss(remaining)
                );
            }
            _ => {
                print!(
                    "\r⏱  {} [{}]: {}   ",
                    timer.status_label(),
                    timer.subject,
                    secs2hhmmss(timer.elapsed_secs(now))
                );
            }
        }
        std::io::stdout().flush().ok();

        let before = timer.session.clone();
        let effects = timer.apply(TimerEvent::Tick, now)?;
        if !effects.is_empty() || timer.session != before {
            println!();
            run_effects(pool, timer, &effects)?;
            save_timer(pool, timer)?;
        }

        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Timer { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;
    let mut timer = load_timer(&pool, cfg)?;

    match action {
        TimerCommands::Start { subject, pomodoro } => {
            if !timer.is_idle() {
                return Err(AppError::Timer(
                    "Timer already active; stop it first".to_string(),
                ));
            }

            // mode and subject can only change while idle
            timer.pomodoro = *pomodoro;
            timer.durations = durations_from(cfg);
            if let Some(s) = subject {
                let s = s.trim();
                if s.is_empty() {
                    return Err(AppError::EmptySubject);
                }
                timer.subject = s.to_string();
            }

            apply_and_persist(&mut pool, &mut timer, TimerEvent::Start)?;

            if *pomodoro {
                success(format!(
                    "Pomodoro started for {} ({} min work sessions).",
                    timer.subject, timer.durations.work_minutes
                ));
                watch(&mut pool, &mut timer)?;
            } else {
                success(format!("Timer started for {}.", timer.subject));
            }
        }

        TimerCommands::Pause => {
            apply_and_persist(&mut pool, &mut timer, TimerEvent::Pause)?;
            print_status(&timer);
        }

        TimerCommands::Resume => {
            apply_and_persist(&mut pool, &mut timer, TimerEvent::Resume)?;
            print_status(&timer);
        }

        TimerCommands::Stop => {
            let was_pomodoro = matches!(timer.session, Session::Countdown { .. });
            apply_and_persist(&mut pool, &mut timer, TimerEvent::Stop)?;
            if was_pomodoro {
                info("Pomodoro aborted; nothing recorded.");
            } else {
                print_status(&timer);
                info("Use 'timer save' to log it or 'timer discard' to drop it.");
            }
        }

        TimerCommands::Save => {
            let elapsed = timer.elapsed_secs(Local::now());
            apply_and_persist(&mut pool, &mut timer, TimerEvent::Save)?;
            if elapsed < 60 {
                info("Session was under a minute; nothing recorded.");
            }
        }

        TimerCommands::Discard => {
            apply_and_persist(&mut pool, &mut timer, TimerEvent::Discard)?;
            info("Session discarded.");
        }

        TimerCommands::Status => {
            // catch up on any overdue Pomodoro transition first
            apply_and_persist(&mut pool, &mut timer, TimerEvent::Tick)?;
            print_status(&timer);
        }

        TimerCommands::Watch => {
            watch(&mut pool, &mut timer)?;
        }
    }

    Ok(())
}
