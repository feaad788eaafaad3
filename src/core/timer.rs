//! Timer state machine.
//!
//! Wall-clock based and toolkit-free: no internal threads, no scheduled
//! callbacks. The caller feeds events (including a periodic `Tick`) and
//! executes the returned effects (persisting a study entry, ringing the
//! terminal bell). State is serde-serializable so the CLI can persist it
//! between invocations.
//!
//! ```text
//! Free:     Idle -> Running <-> Paused -> Stopped -> Idle (save/discard)
//! Pomodoro: Idle -> Work -> (ShortBreak | LongBreak) -> Idle
//! ```

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

/// Key under which the timer is persisted in the `state` table.
pub const STATE_KEY: &str = "timer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// Session durations, taken from the config at start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Durations {
    pub work_minutes: i64,
    pub short_break_minutes: i64,
    pub long_break_minutes: i64,
    pub cycles_per_set: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            cycles_per_set: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Session {
    Idle,
    /// Free timer, counting up. `carried_secs` accumulates across pauses.
    Running {
        started_at: DateTime<Local>,
        carried_secs: i64,
    },
    Paused {
        elapsed_secs: i64,
    },
    /// Free timer finalized, awaiting Save or Discard.
    Stopped {
        elapsed_secs: i64,
    },
    /// Pomodoro countdown (work or break).
    Countdown {
        phase: Phase,
        ends_at: DateTime<Local>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Start,
    Pause,
    Resume,
    Stop,
    Save,
    Discard,
    Tick,
}

/// Side effects the caller must execute after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Persist a study-log entry for today.
    Record { minutes: i64, source: &'static str },
    /// Audible alert.
    Bell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    pub pomodoro: bool,
    pub subject: String,
    /// Completed Work sessions in the current set. Survives the Idle gap
    /// between a break and the next start; cleared on Stop and after a
    /// long break.
    pub cycles: u32,
    pub durations: Durations,
    pub session: Session,
}

impl Timer {
    pub fn new(subject: &str, pomodoro: bool, durations: Durations) -> Self {
        Self {
            pomodoro,
            subject: subject.to_string(),
            cycles: 0,
            durations,
            session: Session::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.session, Session::Idle)
    }

    /// Elapsed seconds of the free timer at instant `now`.
    pub fn elapsed_secs(&self, now: DateTime<Local>) -> i64 {
        match &self.session {
            Session::Running {
                started_at,
                carried_secs,
            } => carried_secs + (now - *started_at).num_seconds(),
            Session::Paused { elapsed_secs } | Session::Stopped { elapsed_secs } => *elapsed_secs,
            _ => 0,
        }
    }

    /// Remaining seconds of the active countdown (negative once overdue).
    pub fn remaining_secs(&self, now: DateTime<Local>) -> Option<i64> {
        match &self.session {
            Session::Countdown { ends_at, .. } => Some((*ends_at - now).num_seconds()),
            _ => None,
        }
    }

    /// Status line shown by `timer status` and `timer watch`.
    pub fn status_label(&self) -> String {
        match &self.session {
            Session::Idle => "Idle".to_string(),
            Session::Running { .. } => "Running".to_string(),
            Session::Paused { .. } => "Paused".to_string(),
            Session::Stopped { .. } => "Stopped (save or discard)".to_string(),
            Session::Countdown { phase, .. } => match phase {
                Phase::Work => format!(
                    "Work ({}/{})",
                    self.cycles + 1,
                    self.durations.cycles_per_set
                ),
                Phase::ShortBreak => format!(
                    "Short Break ({}/{})",
                    self.cycles, self.durations.cycles_per_set
                ),
                Phase::LongBreak => "Long Break".to_string(),
            },
        }
    }

    /// Apply one event at instant `now`. Returns the effects the caller
    /// must execute. Invalid transitions are reported as errors and leave
    /// the state untouched.
    pub fn apply(&mut self, event: TimerEvent, now: DateTime<Local>) -> AppResult<Vec<Effect>> {
        match event {
            TimerEvent::Start => self.on_start(now),
            TimerEvent::Pause => self.on_pause(now),
            TimerEvent::Resume => self.on_resume(now),
            TimerEvent::Stop => self.on_stop(now),
            TimerEvent::Save => self.on_save(),
            TimerEvent::Discard => self.on_discard(),
            TimerEvent::Tick => Ok(self.on_tick(now)),
        }
    }

    fn on_start(&mut self, now: DateTime<Local>) -> AppResult<Vec<Effect>> {
        if !self.is_idle() {
            return Err(AppError::Timer(
                "Timer already active; stop it first".to_string(),
            ));
        }

        if self.pomodoro {
            self.session = Session::Countdown {
                phase: Phase::Work,
                ends_at: now + Duration::minutes(self.durations.work_minutes),
            };
        } else {
            self.session = Session::Running {
                started_at: now,
                carried_secs: 0,
            };
        }
        Ok(Vec::new())
    }

    fn on_pause(&mut self, now: DateTime<Local>) -> AppResult<Vec<Effect>> {
        match self.session {
            Session::Running { .. } => {
                let elapsed = self.elapsed_secs(now);
                self.session = Session::Paused {
                    elapsed_secs: elapsed,
                };
                Ok(Vec::new())
            }
            _ => Err(AppError::Timer("Timer is not running".to_string())),
        }
    }

    fn on_resume(&mut self, now: DateTime<Local>) -> AppResult<Vec<Effect>> {
        match self.session {
            Session::Paused { elapsed_secs } => {
                self.session = Session::Running {
                    started_at: now,
                    carried_secs: elapsed_secs,
                };
                Ok(Vec::new())
            }
            _ => Err(AppError::Timer("Timer is not paused".to_string())),
        }
    }

    fn on_stop(&mut self, now: DateTime<Local>) -> AppResult<Vec<Effect>> {
        match self.session {
            // Aborting a Pomodoro session never records partial work.
            Session::Countdown { .. } => {
                self.session = Session::Idle;
                self.cycles = 0;
                Ok(Vec::new())
            }
            Session::Running { .. } | Session::Paused { .. } => {
                let elapsed = self.elapsed_secs(now);
                self.session = Session::Stopped {
                    elapsed_secs: elapsed,
                };
                Ok(Vec::new())
            }
            _ => Err(AppError::Timer("No active session to stop".to_string())),
        }
    }

    fn on_save(&mut self) -> AppResult<Vec<Effect>> {
        match self.session {
            Session::Stopped { elapsed_secs } => {
                self.session = Session::Idle;
                let minutes = elapsed_secs / 60;
                // Sub-minute sessions are dropped, never written as 0.
                if minutes > 0 {
                    Ok(vec![Effect::Record {
                        minutes,
                        source: "timer",
                    }])
                } else {
                    Ok(Vec::new())
                }
            }
            _ => Err(AppError::Timer(
                "Nothing to save; stop the timer first".to_string(),
            )),
        }
    }

    fn on_discard(&mut self) -> AppResult<Vec<Effect>> {
        match self.session {
            Session::Stopped { .. } => {
                self.session = Session::Idle;
                Ok(Vec::new())
            }
            _ => Err(AppError::Timer(
                "Nothing to discard; stop the timer first".to_string(),
            )),
        }
    }

    /// Periodic tick. Only countdowns change state here; completion fires
    /// on the first tick that observes remaining < 0, so a tick landing
    /// exactly on the deadline still shows 00:00.
    fn on_tick(&mut self, now: DateTime<Local>) -> Vec<Effect> {
        let Session::Countdown { phase, ends_at } = self.session else {
            return Vec::new();
        };

        if (ends_at - now).num_seconds() >= 0 {
            return Vec::new();
        }

        match phase {
            Phase::Work => {
                self.cycles += 1;
                let (next_phase, minutes) = if self.cycles % self.durations.cycles_per_set == 0 {
                    (Phase::LongBreak, self.durations.long_break_minutes)
                } else {
                    (Phase::ShortBreak, self.durations.short_break_minutes)
                };
                self.session = Session::Countdown {
                    phase: next_phase,
                    ends_at: now + Duration::minutes(minutes),
                };
                // A completed Work session records the full fixed length,
                // independent of wall-clock drift.
                vec![
                    Effect::Bell,
                    Effect::Record {
                        minutes: self.durations.work_minutes,
                        source: "pomodoro",
                    },
                ]
            }
            Phase::ShortBreak => {
                self.session = Session::Idle;
                vec![Effect::Bell]
            }
            Phase::LongBreak => {
                self.session = Session::Idle;
                self.cycles = 0;
                vec![Effect::Bell]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 28, 9, 0, 0).unwrap()
    }

    fn after(secs: i64) -> DateTime<Local> {
        t0() + Duration::seconds(secs)
    }

    fn free_timer() -> Timer {
        Timer::new("Math", false, Durations::default())
    }

    fn pomodoro_timer() -> Timer {
        Timer::new("Math", true, Durations::default())
    }

    #[test]
    fn free_timer_counts_wall_clock_time() {
        let mut t = free_timer();
        t.apply(TimerEvent::Start, t0()).unwrap();
        assert_eq!(t.elapsed_secs(after(42)), 42);
    }

    #[test]
    fn pause_accumulates_and_resume_carries_forward() {
        let mut t = free_timer();
        t.apply(TimerEvent::Start, t0()).unwrap();
        t.apply(TimerEvent::Pause, after(30)).unwrap();
        // paused time does not count
        assert_eq!(t.elapsed_secs(after(300)), 30);
        t.apply(TimerEvent::Resume, after(300)).unwrap();
        assert_eq!(t.elapsed_secs(after(330)), 60);
    }

    #[test]
    fn save_under_one_minute_records_nothing() {
        let mut t = free_timer();
        t.apply(TimerEvent::Start, t0()).unwrap();
        t.apply(TimerEvent::Stop, after(45)).unwrap();
        let effects = t.apply(TimerEvent::Save, after(45)).unwrap();
        assert!(effects.is_empty());
        assert!(t.is_idle());
    }

    #[test]
    fn save_ninety_seconds_records_one_minute() {
        let mut t = free_timer();
        t.apply(TimerEvent::Start, t0()).unwrap();
        t.apply(TimerEvent::Stop, after(90)).unwrap();
        let effects = t.apply(TimerEvent::Save, after(90)).unwrap();
        assert_eq!(
            effects,
            vec![Effect::Record {
                minutes: 1,
                source: "timer"
            }]
        );
    }

    #[test]
    fn discard_drops_elapsed_time() {
        let mut t = free_timer();
        t.apply(TimerEvent::Start, t0()).unwrap();
        t.apply(TimerEvent::Stop, after(600)).unwrap();
        let effects = t.apply(TimerEvent::Discard, after(600)).unwrap();
        assert!(effects.is_empty());
        assert!(t.is_idle());
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut t = free_timer();
        t.apply(TimerEvent::Start, t0()).unwrap();
        assert!(t.apply(TimerEvent::Start, after(5)).is_err());
    }

    #[test]
    fn work_completion_records_fixed_duration() {
        let mut t = pomodoro_timer();
        t.apply(TimerEvent::Start, t0()).unwrap();

        // tick exactly on the deadline: still counting
        let effects = t.apply(TimerEvent::Tick, after(25 * 60)).unwrap();
        assert!(effects.is_empty());

        // first tick past the deadline completes the session
        let effects = t.apply(TimerEvent::Tick, after(25 * 60 + 1)).unwrap();
        assert_eq!(
            effects,
            vec![
                Effect::Bell,
                Effect::Record {
                    minutes: 25,
                    source: "pomodoro"
                }
            ]
        );
        assert!(matches!(
            t.session,
            Session::Countdown {
                phase: Phase::ShortBreak,
                ..
            }
        ));
        assert_eq!(t.cycles, 1);
    }

    #[test]
    fn aborting_work_records_nothing() {
        let mut t = pomodoro_timer();
        t.apply(TimerEvent::Start, t0()).unwrap();
        let effects = t.apply(TimerEvent::Stop, after(20 * 60)).unwrap();
        assert!(effects.is_empty());
        assert!(t.is_idle());
        assert_eq!(t.cycles, 0);
    }

    #[test]
    fn break_completion_returns_to_idle_without_record() {
        let mut t = pomodoro_timer();
        t.apply(TimerEvent::Start, t0()).unwrap();
        t.apply(TimerEvent::Tick, after(25 * 60 + 1)).unwrap();

        // run out the short break
        let effects = t.apply(TimerEvent::Tick, after(31 * 60)).unwrap();
        assert_eq!(effects, vec![Effect::Bell]);
        assert!(t.is_idle());
        // the completed work session is still counted
        assert_eq!(t.cycles, 1);
    }

    #[test]
    fn fourth_work_session_leads_to_long_break() {
        let mut t = pomodoro_timer();
        let mut now = t0();
        let mut phases = Vec::new();

        for _ in 0..4 {
            t.apply(TimerEvent::Start, now).unwrap();
            now += Duration::minutes(25) + Duration::seconds(1);
            t.apply(TimerEvent::Tick, now).unwrap();
            let Session::Countdown { phase, .. } = t.session else {
                panic!("expected a break after work");
            };
            phases.push(phase);
            // run out the break
            now += Duration::minutes(20);
            t.apply(TimerEvent::Tick, now).unwrap();
            assert!(t.is_idle());
        }

        assert_eq!(
            phases,
            vec![
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak
            ]
        );
        // counter reset after the long break
        assert_eq!(t.cycles, 0);
    }

    #[test]
    fn countdown_remaining_goes_negative_when_overdue() {
        let mut t = pomodoro_timer();
        t.apply(TimerEvent::Start, t0()).unwrap();
        assert_eq!(t.remaining_secs(after(60)), Some(24 * 60));
        assert!(t.remaining_secs(after(26 * 60)).unwrap() < 0);
    }
}
