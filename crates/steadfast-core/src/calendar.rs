//! Calendar and date helpers.
//!
//! Every calendar-day comparison in the crate goes through this module. Days
//! are local wall-clock days: timestamps are `NaiveDateTime` in local time and
//! dates are `NaiveDate`. Weekday indices run 0=Sunday ..= 6=Saturday.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::DateError;

const DATE_FORMAT: &str = "%Y-%m-%d";

const NAIVE_TIMESTAMP_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Longest day window any view may ask for.
pub const MAX_WINDOW_DAYS: u32 = 365;

const SHORT_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Current local wall-clock time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today's date as `YYYY-MM-DD`.
pub fn today_date_string() -> String {
    date_string(today())
}

/// Format a date as `YYYY-MM-DD`.
pub fn date_string(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// True when both timestamps fall on the same calendar day.
pub fn is_same_calendar_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Midnight at the start of the timestamp's day.
pub fn start_of_day(at: NaiveDateTime) -> NaiveDateTime {
    at.date().and_time(NaiveTime::MIN)
}

/// Weekday index with Sunday as 0.
pub fn weekday_index(date: impl Datelike) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Inverse of [`weekday_index`].
pub fn weekday_from_index(index: u8) -> Result<Weekday, DateError> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        other => Err(DateError::OutOfRange {
            kind: "weekday index",
            value: other as i64,
        }),
    }
}

/// Seed of the day: `year * 10000 + month * 100 + day`, month 1-indexed.
pub fn day_seed(date: impl Datelike) -> i64 {
    date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64
}

/// Parse a `YYYY-MM-DD` date.
///
/// A full timestamp is accepted too. It must be well formed as a whole; the
/// date is the part before `T`, read without any timezone shift.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    let input = input.trim();
    let malformed = || DateError::malformed("date", input);
    let head = match input.split_once('T') {
        None => input,
        Some((head, _)) => {
            let valid = DateTime::parse_from_rfc3339(input).is_ok()
                || NAIVE_TIMESTAMP_FORMATS
                    .iter()
                    .any(|fmt| NaiveDateTime::parse_from_str(input, fmt).is_ok());
            if !valid {
                return Err(malformed());
            }
            head
        }
    };
    NaiveDate::parse_from_str(head, DATE_FORMAT).map_err(|_| malformed())
}

/// Parse a timestamp into local wall-clock time.
///
/// Accepts RFC 3339 (converted to local time), a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` timestamp, or a bare date (midnight).
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, DateError> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }
    for fmt in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| DateError::malformed("timestamp", input))
}

/// Full English weekday name, e.g. "Thursday".
pub fn weekday_name(date: impl Datelike) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Header label such as "Thursday, June 15".
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{}, {}", weekday_name(date), date.format("%B %-d"))
}

/// Long label with the year, e.g. "Thursday, June 15, 2023".
pub fn format_full_date(date: NaiveDate) -> String {
    format!("{}, {}", weekday_name(date), date.format("%B %-d, %Y"))
}

/// Convert a 24-hour `HH:MM` time into `h:MM AM/PM`.
pub fn format_time(time: &str) -> Result<String, DateError> {
    let (hours, minutes) = time
        .trim()
        .split_once(':')
        .ok_or_else(|| DateError::malformed("time", time))?;
    let hour: u32 = hours
        .parse()
        .map_err(|_| DateError::malformed("time", time))?;
    let minute: u32 = minutes
        .parse()
        .map_err(|_| DateError::malformed("time", time))?;
    if hour > 23 {
        return Err(DateError::OutOfRange {
            kind: "hour",
            value: hour as i64,
        });
    }
    if minutes.len() != 2 || minute > 59 {
        return Err(DateError::malformed("time", time));
    }

    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    Ok(format!("{display_hour}:{minutes} {period}"))
}

/// Short weekday names ("Mon", "Wed", ...) for a list of weekday indices.
pub fn day_names(days: &[u8]) -> Result<Vec<&'static str>, DateError> {
    days.iter()
        .map(|&d| {
            SHORT_DAY_NAMES
                .get(d as usize)
                .copied()
                .ok_or(DateError::OutOfRange {
                    kind: "weekday index",
                    value: d as i64,
                })
        })
        .collect()
}

/// The `n` days ending at `today`, oldest first.
///
/// `n` is capped at [`MAX_WINDOW_DAYS`]; the window also stops at the
/// earliest representable date.
pub fn trailing_days(today: NaiveDate, n: u32) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = (0..n.min(MAX_WINDOW_DAYS))
        .map_while(|back| today.checked_sub_days(Days::new(back.into())))
        .collect();
    days.reverse();
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        ymd(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn same_day_ignores_time_of_day() {
        assert!(is_same_calendar_day(at(2023, 6, 15, 0, 1), at(2023, 6, 15, 23, 59)));
        assert!(!is_same_calendar_day(at(2023, 6, 14, 23, 0), at(2023, 6, 15, 0, 1)));
    }

    #[test]
    fn weekday_index_starts_on_sunday() {
        assert_eq!(weekday_index(ymd(2023, 6, 11)), 0); // Sunday
        assert_eq!(weekday_index(ymd(2023, 6, 15)), 4); // Thursday
        assert_eq!(weekday_index(ymd(2023, 6, 17)), 6); // Saturday
    }

    #[test]
    fn weekday_from_index_round_trips_and_rejects_seven() {
        for i in 0..7u8 {
            let wd = weekday_from_index(i).unwrap();
            assert_eq!(wd.num_days_from_sunday() as u8, i);
        }
        assert!(weekday_from_index(7).is_err());
    }

    #[test]
    fn day_seed_matches_formula() {
        assert_eq!(day_seed(ymd(2023, 6, 15)), 20_230_615);
        assert_eq!(day_seed(ymd(2024, 12, 1)), 20_241_201);
    }

    #[test]
    fn date_string_is_zero_padded() {
        assert_eq!(date_string(ymd(2023, 6, 5)), "2023-06-05");
    }

    #[test]
    fn parse_date_accepts_timestamps_and_rejects_garbage() {
        assert_eq!(parse_date("2023-06-15").unwrap(), ymd(2023, 6, 15));
        assert_eq!(parse_date("2023-06-15T08:00:00Z").unwrap(), ymd(2023, 6, 15));
        assert!(matches!(
            parse_date("2023-13-01"),
            Err(DateError::Malformed { .. })
        ));
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn parse_date_rejects_a_malformed_time_part() {
        assert_eq!(parse_date("2023-06-15T08:30").unwrap(), ymd(2023, 6, 15));
        assert!(matches!(
            parse_date("2023-06-15Tgarbage"),
            Err(DateError::Malformed { .. })
        ));
        assert!(parse_date("2023-06-15T25:00:00").is_err());
        assert!(parse_date("2023-06-15T").is_err());
    }

    #[test]
    fn parse_timestamp_variants() {
        assert_eq!(
            parse_timestamp("2023-06-14T23:00:00").unwrap(),
            at(2023, 6, 14, 23, 0)
        );
        assert_eq!(
            parse_timestamp("2023-06-14").unwrap(),
            at(2023, 6, 14, 0, 0)
        );
        assert!(parse_timestamp("2023-06-14T25:00:00").is_err());
    }

    #[test]
    fn start_of_day_truncates() {
        assert_eq!(start_of_day(at(2023, 6, 15, 13, 45)), at(2023, 6, 15, 0, 0));
    }

    #[test]
    fn long_date_labels() {
        assert_eq!(format_long_date(ymd(2023, 6, 15)), "Thursday, June 15");
        assert_eq!(format_full_date(ymd(2023, 6, 5)), "Monday, June 5, 2023");
    }

    #[test]
    fn format_time_converts_to_twelve_hour() {
        assert_eq!(format_time("07:00").unwrap(), "7:00 AM");
        assert_eq!(format_time("00:15").unwrap(), "12:15 AM");
        assert_eq!(format_time("12:30").unwrap(), "12:30 PM");
        assert_eq!(format_time("21:05").unwrap(), "9:05 PM");
    }

    #[test]
    fn format_time_rejects_malformed_input() {
        assert!(format_time("7").is_err());
        assert!(format_time("24:00").is_err());
        assert!(format_time("10:5").is_err());
        assert!(format_time("ab:cd").is_err());
    }

    #[test]
    fn day_names_maps_indices() {
        assert_eq!(day_names(&[1, 3, 5]).unwrap(), vec!["Mon", "Wed", "Fri"]);
        assert!(day_names(&[0, 9]).is_err());
    }

    #[test]
    fn trailing_days_oldest_first() {
        let days = trailing_days(ymd(2023, 6, 15), 3);
        assert_eq!(days, vec![ymd(2023, 6, 13), ymd(2023, 6, 14), ymd(2023, 6, 15)]);
    }

    #[test]
    fn trailing_days_caps_huge_windows() {
        let today = ymd(2023, 6, 15);
        let days = trailing_days(today, u32::MAX);
        assert_eq!(days.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(days.last(), Some(&today));
        assert_eq!(trailing_days(today, 200_000_000).len(), MAX_WINDOW_DAYS as usize);
        assert!(trailing_days(today, 0).is_empty());
    }

    #[test]
    fn trailing_days_stops_at_the_earliest_date() {
        let days = trailing_days(NaiveDate::MIN, 30);
        assert_eq!(days, vec![NaiveDate::MIN]);
    }
}
