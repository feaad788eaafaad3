use chrono::{Datelike, Duration, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Monday of the week containing `d`.
pub fn monday_of_week(d: NaiveDate) -> NaiveDate {
    d - Duration::days(d.weekday().num_days_from_monday() as i64)
}

/// Inclusive 7-day window ending at `end` (used by the weekly report).
pub fn last_seven_days(end: NaiveDate) -> (NaiveDate, NaiveDate) {
    (end - Duration::days(6), end)
}

/// Resolve a `--period` expression into inclusive date bounds.
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - start:end in any of the above (same granularity on both sides)
pub fn parse_period(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    if let Some((start_raw, end_raw)) = p.split_once(':') {
        let (s1, _) = parse_period(start_raw.trim())?;
        let (_, e2) = parse_period(end_raw.trim())?;
        if s1 > e2 {
            return Err(format!("Invalid period: start after end in '{}'", p));
        }
        return Ok((s1, e2));
    }

    // dispatch on byte length only; chrono does the actual validation,
    // so malformed (including non-ASCII) input falls through to an Err
    match p.len() {
        // YYYY
        4 => {
            let d1 = NaiveDate::parse_from_str(&format!("{}-01-01", p), "%Y-%m-%d")
                .map_err(|_| format!("Invalid year: {}", p))?;
            let d2 = NaiveDate::from_ymd_opt(d1.year(), 12, 31)
                .ok_or_else(|| format!("Invalid year: {}", p))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{}-01", p), "%Y-%m-%d")
                .map_err(|_| format!("Invalid month: {}", p))?;
            Ok((d1, month_end(d1)))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(p).ok_or_else(|| format!("Invalid date: {}", p))?;
            Ok((d, d))
        }
        _ => Err(format!("Unsupported period format: {}", p)),
    }
}

/// Last day of the month containing `first` (the first of next month,
/// stepped back one day).
fn month_end(first: NaiveDate) -> NaiveDate {
    let (y, m) = (first.year(), first.month());
    let next_month = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    };
    next_month.and_then(|d| d.pred_opt()).unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn period_single_day() {
        assert_eq!(parse_period("2026-03-05").unwrap(), (d("2026-03-05"), d("2026-03-05")));
    }

    #[test]
    fn period_month_handles_leap_february() {
        assert_eq!(parse_period("2024-02").unwrap(), (d("2024-02-01"), d("2024-02-29")));
        assert_eq!(parse_period("2025-02").unwrap(), (d("2025-02-01"), d("2025-02-28")));
    }

    #[test]
    fn period_range() {
        assert_eq!(
            parse_period("2025-06:2025-08").unwrap(),
            (d("2025-06-01"), d("2025-08-31"))
        );
    }

    #[test]
    fn period_rejects_garbage() {
        assert!(parse_period("last week").is_err());
        assert!(parse_period("2026-13").is_err());
    }

    #[test]
    fn period_rejects_non_ascii_without_panicking() {
        // multibyte input whose byte length matches a supported format
        assert!(parse_period("€€x").is_err());
        assert!(parse_period("€a").is_err());
        assert!(parse_period("20€6-03-01").is_err());
    }

    #[test]
    fn period_december_ends_on_the_31st() {
        assert_eq!(parse_period("2026-12").unwrap(), (d("2026-12-01"), d("2026-12-31")));
    }

    #[test]
    fn seven_day_window_is_inclusive() {
        let (start, end) = last_seven_days(d("2026-08-28"));
        assert_eq!(start, d("2026-08-22"));
        assert_eq!(end, d("2026-08-28"));
    }
}
