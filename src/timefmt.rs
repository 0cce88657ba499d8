//! Time labels shared by every view.

use chrono::{DateTime, Utc};

/// Human label for how long ago `ts` was, as seen from `now`.
///
/// Timestamps in the future read as "Just now". Anything a week or older
/// falls back to [`short_date`].
pub fn relative(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(ts);
    let seconds = elapsed.num_seconds();
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if seconds < 60 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        short_date(ts)
    }
}

/// Like [`relative`], with "Never" for a missing timestamp.
pub fn relative_or_never(ts: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    ts.map_or_else(|| "Never".to_string(), |ts| relative(ts, now))
}

/// Abbreviated month and day, e.g. "Jan 5".
pub fn short_date(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d").to_string()
}

/// 12-hour clock time, e.g. "3:07 PM".
pub fn clock_time(ts: DateTime<Utc>) -> String {
    ts.format("%-I:%M %p").to_string()
}

/// "Xh Ym" for durations of an hour or more, otherwise "Ym".
pub fn duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 20, 15, 7, 0).unwrap()
    }

    #[test]
    fn under_a_minute_is_just_now() {
        assert_eq!(relative(now(), now()), "Just now");
        assert_eq!(relative(now() - Duration::seconds(59), now()), "Just now");
    }

    #[test]
    fn future_timestamps_are_just_now() {
        assert_eq!(relative(now() + Duration::hours(3), now()), "Just now");
    }

    #[test]
    fn minutes_and_hours() {
        assert_eq!(relative(now() - Duration::seconds(60), now()), "1m ago");
        assert_eq!(relative(now() - Duration::minutes(59), now()), "59m ago");
        assert_eq!(relative(now() - Duration::minutes(60), now()), "1h ago");
        assert_eq!(relative(now() - Duration::hours(23), now()), "23h ago");
    }

    #[test]
    fn one_whole_day_is_yesterday() {
        assert_eq!(relative(now() - Duration::hours(24), now()), "Yesterday");
        assert_eq!(relative(now() - Duration::hours(47), now()), "Yesterday");
        assert_eq!(relative(now() - Duration::hours(48), now()), "2d ago");
    }

    #[test]
    fn week_or_older_uses_date() {
        assert_eq!(relative(now() - Duration::days(6), now()), "6d ago");
        assert_eq!(relative(now() - Duration::days(7), now()), "Mar 13");
        assert_eq!(relative(now() - Duration::days(80), now()), "Dec 30");
    }

    #[test]
    fn never_for_missing() {
        assert_eq!(relative_or_never(None, now()), "Never");
        assert_eq!(
            relative_or_never(Some(now() - Duration::minutes(5)), now()),
            "5m ago"
        );
    }

    #[test]
    fn date_and_clock_formats() {
        assert_eq!(short_date(now()), "Mar 20");
        assert_eq!(clock_time(now()), "3:07 PM");
        let morning = Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap();
        assert_eq!(short_date(morning), "Jan 5");
        assert_eq!(clock_time(morning), "9:30 AM");
    }

    #[test]
    fn duration_formats() {
        assert_eq!(duration(0), "0m");
        assert_eq!(duration(59), "0m");
        assert_eq!(duration(45 * 60), "45m");
        assert_eq!(duration(2 * 3600 + 5 * 60), "2h 5m");
        assert_eq!(duration(3600), "1h 0m");
    }
}
