use chrono::{DateTime, Local, Utc};

/// Seconds with one decimal, e.g. `2.3s`.
#[must_use]
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.1}s")
}

/// Timer line shown above the scoreboard.
#[must_use]
pub fn format_timer(seconds: f64) -> String {
    format!("Time: {}", format_seconds(seconds))
}

/// Local wall-clock rendering of a stored UTC timestamp.
#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use math_core::time::fixed_now;

    #[test]
    fn seconds_keep_one_decimal() {
        assert_eq!(format_seconds(2.34), "2.3s");
        assert_eq!(format_seconds(0.0), "0.0s");
        assert_eq!(format_timer(12.3), "Time: 12.3s");
    }

    #[test]
    fn datetime_renders_the_calendar_date() {
        let rendered = format_datetime(fixed_now());
        assert!(rendered.starts_with("2023-11-1"), "{rendered}");
        assert_eq!(rendered.len(), "2023-11-14 22:13:20".len());
    }
}
