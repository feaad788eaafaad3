//! Aggregation helpers and the `stats` terminal charts.

use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::StudyEntry;
use crate::ui::messages::warning;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use crate::utils::date::parse_period;
use crate::utils::formatting::{bar, mins2readable};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Total minutes per subject, busiest first (ties alphabetical).
pub fn subject_totals(entries: &[StudyEntry]) -> Vec<(String, i64)> {
    let mut map: BTreeMap<String, i64> = BTreeMap::new();
    for e in entries {
        *map.entry(e.subject.clone()).or_insert(0) += e.minutes;
    }

    let mut out: Vec<(String, i64)> = map.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Total minutes per day over the inclusive [start, end] window.
/// Days without entries appear with 0 so charts keep their shape.
pub fn day_totals(entries: &[StudyEntry], start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, i64)> {
    let mut map: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut day = start;
    while day <= end {
        map.insert(day, 0);
        day += Duration::days(1);
    }

    for e in entries {
        if let Some(total) = map.get_mut(&e.date) {
            *total += e.minutes;
        }
    }

    map.into_iter().collect()
}

pub struct StatsLogic;

impl StatsLogic {
    /// Print study-time distribution charts, over the whole history or a
    /// `--period` window.
    pub fn print(pool: &mut DbPool, period: Option<&str>) -> AppResult<()> {
        let (entries, window) = match period {
            Some(p) => {
                let (start, end) = parse_period(p).map_err(AppError::InvalidDate)?;
                let entries =
                    db::queries::load_entries_between(&pool.conn, start, end, None)?;
                (entries, Some((start, end)))
            }
            None => (db::queries::load_all_entries(&pool.conn)?, None),
        };

        if entries.is_empty() {
            warning("No data to analyze.");
            return Ok(());
        }

        let by_subject = subject_totals(&entries);
        let total: i64 = by_subject.iter().map(|(_, m)| m).sum();
        let max = by_subject.iter().map(|(_, m)| *m).max().unwrap_or(0);
        let name_w = by_subject
            .iter()
            .map(|(s, _)| s.chars().count())
            .max()
            .unwrap_or(0);

        println!("\n{}📊 Study time by subject{}\n", CYAN, RESET);
        for (subject, minutes) in &by_subject {
            let pct = *minutes as f64 / total as f64 * 100.0;
            println!(
                "  {:<name_w$}  {}{:<24}{} {} ({:.1}%)",
                subject,
                GREEN,
                bar(*minutes, max, 24),
                RESET,
                mins2readable(*minutes, false),
                pct,
                name_w = name_w
            );
        }

        // daily chart: the requested window, or the most recent month of
        // activity when none was given; skipped for windows too wide to read
        let chart_window = match window {
            Some(w) => Some(w),
            None => entries
                .iter()
                .map(|e| e.date)
                .max()
                .map(|end| (end - Duration::days(30), end)),
        };
        if let Some((start, end)) = chart_window {
            if (end - start).num_days() <= 31 {
                let by_day = day_totals(&entries, start, end);
                let day_max = by_day.iter().map(|(_, m)| *m).max().unwrap_or(0);

                println!("\n{}📅 Study time by day{}\n", CYAN, RESET);
                for (day, minutes) in &by_day {
                    println!(
                        "  {}  {}{:<24}{} {}",
                        day.format("%Y-%m-%d"),
                        GREEN,
                        bar(*minutes, day_max, 24),
                        RESET,
                        mins2readable(*minutes, false)
                    );
                }
            }
        }

        println!(
            "\n{}• Total:{} {}{}{}\n",
            CYAN,
            RESET,
            YELLOW,
            mins2readable(total, false),
            RESET
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(date: &str, subject: &str, minutes: i64) -> StudyEntry {
        StudyEntry::new(d(date), subject, minutes, "manual")
    }

    #[test]
    fn subject_totals_sorted_busiest_first() {
        let entries = vec![
            entry("2026-08-20", "Math", 30),
            entry("2026-08-21", "English", 100),
            entry("2026-08-22", "Math", 40),
        ];
        assert_eq!(
            subject_totals(&entries),
            vec![("English".to_string(), 100), ("Math".to_string(), 70)]
        );
    }

    #[test]
    fn day_totals_zero_fills_missing_days() {
        let entries = vec![entry("2026-08-20", "Math", 30)];
        let totals = day_totals(&entries, d("2026-08-19"), d("2026-08-21"));
        assert_eq!(
            totals,
            vec![
                (d("2026-08-19"), 0),
                (d("2026-08-20"), 30),
                (d("2026-08-21"), 0),
            ]
        );
    }

    #[test]
    fn day_totals_ignores_entries_outside_window() {
        let entries = vec![
            entry("2026-08-18", "Math", 99),
            entry("2026-08-19", "Math", 10),
        ];
        let totals = day_totals(&entries, d("2026-08-19"), d("2026-08-19"));
        assert_eq!(totals, vec![(d("2026-08-19"), 10)]);
    }
}
