//! Relative phrases such as "5 Minutes Ago" and "Yesterday".

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::util::timezone::{localized_date, start_of_day};

const MINUTE_MILLIS: i64 = 60_000;
const DAY_MINUTES: i64 = 60 * 24;

/// Reserved names intercepted before lookup, compared case-insensitively.
pub const AGO_NAMES: [&str; 2] = ["ago", "a"];
pub const DAYS_AGO_NAMES: [&str; 2] = ["days_ago", "da"];

pub(crate) fn is_ago(name: &str) -> bool {
    AGO_NAMES.iter().any(|reserved| name.eq_ignore_ascii_case(reserved))
}

pub(crate) fn is_days_ago(name: &str) -> bool {
    DAYS_AGO_NAMES
        .iter()
        .any(|reserved| name.eq_ignore_ascii_case(reserved))
}

fn minutes_between(instant: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - instant).num_milliseconds() / MINUTE_MILLIS
}

/// Elapsed wall-clock time in minutes, hours or days. Zone-independent.
pub fn ago(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = minutes_between(instant, now);
    if minutes <= 1 {
        "1 Minute Ago".to_string()
    } else if minutes < 60 {
        format!("{minutes} Minutes Ago")
    } else if minutes < DAY_MINUTES {
        match minutes / 60 {
            1 => "1 Hour Ago".to_string(),
            hours => format!("{hours} Hours Ago"),
        }
    } else {
        day_bucket(minutes)
    }
}

/// Calendar-day phrase: "Today" and "Yesterday" follow midnight in `tz`,
/// older instants fall back to the elapsed day count.
pub fn days_ago(instant: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> String {
    let today = localized_date(now, tz);
    let midnight_today = start_of_day(today, tz);
    if instant >= midnight_today {
        return "Today".to_string();
    }

    let midnight_yesterday = today
        .pred_opt()
        .map(|yesterday| start_of_day(yesterday, tz))
        .unwrap_or(midnight_today);
    if instant >= midnight_yesterday {
        return "Yesterday".to_string();
    }

    // Can still yield "Yesterday" when less than 48h elapsed.
    day_bucket(minutes_between(instant, now))
}

fn day_bucket(minutes: i64) -> String {
    match minutes / DAY_MINUTES {
        1 => "Yesterday".to_string(),
        days => format!("{days} Days Ago"),
    }
}
