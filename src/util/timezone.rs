use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::domain::error::FormatError;

static SYSTEM_TIME_ZONE: Lazy<Tz> = Lazy::new(resolve_system_time_zone);

/// The process default time zone, resolved once from the host and falling back
/// to UTC.
pub fn system_time_zone() -> Tz {
    *SYSTEM_TIME_ZONE
}

fn resolve_system_time_zone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse::<Tz>().unwrap_or_else(|err| {
            debug!(zone = %name, error = %err, "Host time zone not in tz database, using UTC");
            Tz::UTC
        }),
        Err(err) => {
            debug!(error = %err, "Host time zone unavailable, using UTC");
            Tz::UTC
        }
    }
}

pub fn parse_time_zone(value: &str) -> Result<Tz, FormatError> {
    value
        .trim()
        .parse::<Tz>()
        .map_err(|_| FormatError::unknown_time_zone(value))
}

pub fn localized_datetime(time: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    time.with_timezone(&tz)
}

pub fn localized_date(time: DateTime<Utc>, tz: Tz) -> NaiveDate {
    localized_datetime(time, tz).date_naive()
}

/// First instant of `date` in `tz`. When a DST transition skips local
/// midnight, the first valid local time after it is used.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    let mut probe = midnight;
    for _ in 0..4 {
        if let Some(local) = tz.from_local_datetime(&probe).earliest() {
            return local.with_timezone(&Utc);
        }
        probe += Duration::minutes(30);
    }
    Utc.from_utc_datetime(&midnight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iana_names() {
        assert_eq!(parse_time_zone("Europe/Paris"), Ok(Tz::Europe__Paris));
        assert_eq!(parse_time_zone(" UTC "), Ok(Tz::UTC));
        assert!(parse_time_zone("Mars/Olympus").is_err());
    }

    #[test]
    fn start_of_day_respects_offset() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        let start = start_of_day(date, Tz::Europe__Paris);
        assert_eq!(start.to_rfc3339(), "2024-01-14T23:00:00+00:00");
    }

    #[test]
    fn start_of_day_skips_missing_midnight() {
        // Sao Paulo moved clocks from 00:00 to 01:00 on 2018-11-04.
        let date = NaiveDate::from_ymd_opt(2018, 11, 4).expect("valid date");
        let start = start_of_day(date, Tz::America__Sao_Paulo);
        let local = localized_datetime(start, Tz::America__Sao_Paulo);
        assert_eq!(local.date_naive(), date);
        assert_eq!(local.format("%H:%M").to_string(), "01:00");
    }

    #[test]
    fn localized_date_crosses_midnight() {
        let instant = Utc
            .with_ymd_and_hms(2024, 3, 1, 23, 30, 0)
            .single()
            .expect("valid instant");
        assert_eq!(
            localized_date(instant, Tz::Asia__Tokyo),
            NaiveDate::from_ymd_opt(2024, 3, 2).expect("valid date")
        );
    }
}
