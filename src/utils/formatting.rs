//! Formatting utilities used for CLI and report outputs.

/// `125` → `"02h 05m"` (or `"02:05"` in short form).
pub fn mins2readable(mins: i64, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;
    let sign = if mins < 0 { "-" } else { "" };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Countdown display for Pomodoro sessions: `1510` seconds → `"25:10"`.
pub fn secs2mmss(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}:{:02}", s / 60, s % 60)
}

/// Free-timer display: `3725` seconds → `"01:02:05"`.
pub fn secs2hhmmss(secs: i64) -> String {
    let s = secs.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

/// Fixed-width ASCII bar used by the `stats` charts.
pub fn bar(value: i64, max: i64, width: usize) -> String {
    if max <= 0 || value <= 0 {
        return String::new();
    }
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.min(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_minutes() {
        assert_eq!(mins2readable(125, false), "02h 05m");
        assert_eq!(mins2readable(125, true), "02:05");
        assert_eq!(mins2readable(0, false), "00h 00m");
    }

    #[test]
    fn countdown_formats() {
        assert_eq!(secs2mmss(1510), "25:10");
        assert_eq!(secs2mmss(0), "00:00");
        assert_eq!(secs2mmss(-3), "00:00");
        assert_eq!(secs2hhmmss(3725), "01:02:05");
    }

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(100, 100, 10).chars().count(), 10);
        assert_eq!(bar(50, 100, 10).chars().count(), 5);
        assert_eq!(bar(0, 100, 10), "");
    }
}
