//! Human-readable energy and time formatting helpers.

use chrono::{DateTime, Utc};

/// Format an energy figure as "1.25 kWh". Defaults flow through as "0.00 kWh".
pub fn fmt_kwh(kwh: f64) -> String {
    format!("{kwh:.2} kWh")
}

/// Format a power figure as "640 W".
pub fn fmt_watts(watts: f64) -> String {
    format!("{watts:.0} W")
}

/// Format a duration in hours as "1.5 h".
pub fn fmt_hours(hours: f64) -> String {
    format!("{hours:.1} h")
}

/// Format a timestamp the way the backend renders them, or "Unknown".
pub fn fmt_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(
        || "Unknown".into(),
        |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

/// Compact clock label for chart axes.
pub fn fmt_clock(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(String::new, |t| t.format("%H:%M").to_string())
}

/// Format seconds-since-refresh for the status bar.
pub fn fmt_age(secs: u64) -> String {
    if secs < 5 {
        "just now".into()
    } else if secs < 60 {
        format!("{secs}s ago")
    } else {
        format!("{}m ago", secs / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kwh_renders_defaults_as_zero_point_zero_zero() {
        assert_eq!(fmt_kwh(0.0), "0.00 kWh");
        assert_eq!(fmt_kwh(1.256), "1.26 kWh");
    }

    #[test]
    fn missing_timestamp_is_unknown() {
        assert_eq!(fmt_timestamp(None), "Unknown");
    }

    #[test]
    fn age_buckets() {
        assert_eq!(fmt_age(2), "just now");
        assert_eq!(fmt_age(42), "42s ago");
        assert_eq!(fmt_age(130), "2m ago");
    }
}
