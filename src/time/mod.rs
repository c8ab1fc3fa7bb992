//! Time module for astronomical time calculations
//!
//! Every routine in this crate takes wall-clock timestamps as
//! `chrono::DateTime` values in any time zone. They are normalised to UTC
//! before use, and the Julian Date (a continuous day count with the time of
//! day as a fraction) is the internal representation of time.

pub mod calendar;

use crate::constants::{DAY_S, MJD_OFFSET, UNIX_EPOCH_JD};
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use lazy_static::lazy_static;
use thiserror::Error;

/// Error type for time operations
#[derive(Debug, Error, PartialEq)]
pub enum TimeError {
    #[error("Julian date {0} cannot be represented as a UTC timestamp")]
    OutOfRange(f64),

    #[error("Invalid calendar date: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    },
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

lazy_static! {
    // Both epochs are computed from the calendar formula once, on first use.
    static ref J2000_JD: f64 = julian_date(2000, 1, 1, 12, 0, 0);
    static ref B1950_JD: f64 = julian_date(1949, 12, 31, 22, 9, 0);
}

/// Julian date from a proleptic Gregorian UTC calendar date and time of day
///
/// No range check is made; the day number formula is valid for every date
/// after 4801 BC.
///
/// ```rust
/// use radiosky::time::julian_date;
///
/// assert_eq!(julian_date(2000, 1, 1, 12, 0, 0), 2451545.0);
/// ```
pub fn julian_date(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> f64 {
    let jdn = calendar::julian_day_number(year, month, day);

    jdn as f64
        + (f64::from(hour) / 24.0 - 0.5)
        + f64::from(minute) / (24.0 * 60.0)
        + f64::from(second) / DAY_S
}

/// Julian date of a timestamp, after conversion to UTC
///
/// Sub-second precision of the timestamp is kept.
pub fn julian_date_from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let utc = dt.with_timezone(&Utc);
    let jd = julian_date(
        utc.year(),
        utc.month(),
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second(),
    );
    jd + f64::from(utc.nanosecond()) / 1_000_000_000.0 / DAY_S
}

/// Modified Julian date (JD - 2400000.5) of a timestamp
pub fn modified_julian_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    julian_date_from_datetime(dt) - MJD_OFFSET
}

/// Convert a Julian date to a UTC timestamp, to the nearest millisecond
pub fn julian_date_to_datetime(jd: f64) -> Result<DateTime<Utc>> {
    let millis = ((jd - UNIX_EPOCH_JD) * DAY_S * 1000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return Err(TimeError::OutOfRange(jd));
    }

    Utc.timestamp_millis_opt(millis as i64)
        .single()
        .ok_or(TimeError::OutOfRange(jd))
}

/// Build a UTC timestamp from calendar fields, rejecting impossible dates
pub fn utc_datetime(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .ok_or(TimeError::InvalidDate {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
}

/// Julian date of the J2000.0 epoch
pub fn jd_j2000() -> f64 {
    *J2000_JD
}

/// Julian date of the B1950.0 epoch
pub fn jd_b1950() -> f64 {
    *B1950_JD
}

/// Julian date of the current system time
pub fn jd_now() -> f64 {
    julian_date_from_datetime(&Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::J2000;
    use approx::assert_abs_diff_eq;
    use chrono::{Duration, FixedOffset};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_j2000_is_exact() {
        assert_eq!(julian_date(2000, 1, 1, 12, 0, 0), J2000);
        assert_eq!(jd_j2000(), J2000);
    }

    #[test]
    fn test_b1950_epoch() {
        // 1949-12-31 22:09 UT
        assert_abs_diff_eq!(jd_b1950(), 2433282.4229166667, epsilon = 1e-9);
    }

    #[test]
    fn test_time_of_day_fraction() {
        assert_eq!(julian_date(2000, 1, 1, 0, 0, 0), 2451544.5);
        assert_abs_diff_eq!(
            julian_date(2000, 1, 1, 18, 0, 0),
            2451545.25,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            julian_date(2000, 1, 1, 12, 0, 36),
            J2000 + 36.0 / DAY_S,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_datetime_is_normalised_to_utc() {
        let utc = utc_datetime(2021, 6, 21, 10, 30, 0).unwrap();
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let local = utc.with_timezone(&offset);

        assert_eq!(
            julian_date_from_datetime(&utc),
            julian_date_from_datetime(&local)
        );
    }

    #[test]
    fn test_subsecond_precision_kept() {
        let base = utc_datetime(2010, 3, 4, 5, 6, 7).unwrap();
        let later = base + Duration::milliseconds(500);
        let diff = julian_date_from_datetime(&later) - julian_date_from_datetime(&base);
        assert_abs_diff_eq!(diff * DAY_S, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_modified_julian_date() {
        let dt = utc_datetime(1858, 11, 17, 0, 0, 0).unwrap();
        assert_abs_diff_eq!(modified_julian_date(&dt), 0.0, epsilon = 1e-9);

        let dt = utc_datetime(2000, 1, 1, 12, 0, 0).unwrap();
        assert_abs_diff_eq!(modified_julian_date(&dt), 51544.5, epsilon = 1e-9);
    }

    #[test]
    fn test_unix_epoch() {
        let dt = julian_date_to_datetime(UNIX_EPOCH_JD).unwrap();
        assert_eq!(dt.timestamp(), 0);
    }

    #[test]
    fn test_roundtrip_1900_to_2100() {
        let mut rng = StdRng::seed_from_u64(19002100);
        let start = utc_datetime(1900, 1, 1, 0, 0, 0).unwrap().timestamp();
        let end = utc_datetime(2100, 12, 31, 23, 59, 59).unwrap().timestamp();

        for _ in 0..500 {
            let secs = rng.gen_range(start..end);
            let dt = Utc.timestamp_opt(secs, 0).unwrap();
            let back = julian_date_to_datetime(julian_date_from_datetime(&dt)).unwrap();
            let error = (back - dt).num_milliseconds().abs();
            assert!(error < 1000, "{} came back as {}", dt, back);
        }
    }

    #[test]
    fn test_non_finite_julian_date_is_rejected() {
        assert!(matches!(
            julian_date_to_datetime(f64::NAN),
            Err(TimeError::OutOfRange(_))
        ));
        assert!(julian_date_to_datetime(f64::INFINITY).is_err());
        assert!(julian_date_to_datetime(1e300).is_err());
    }

    #[test]
    fn test_invalid_calendar_date() {
        let err = utc_datetime(2021, 2, 30, 0, 0, 0).unwrap_err();
        assert!(matches!(err, TimeError::InvalidDate { month: 2, day: 30, .. }));
    }
}
