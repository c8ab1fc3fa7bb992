//! Calendar date and day number conversion functions
//!
//! All routines use the proleptic Gregorian calendar and integer
//! arithmetic that truncates toward zero, so the results match the
//! published Julian Day Number formula for every date after 4801 BC.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

/// Convert (year, month, day) to the integer Julian Day Number
///
/// The Julian Day Number labels the day that starts at the preceding noon,
/// so `julian_day_number(2000, 1, 1)` is 2451545.
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let year = i64::from(year);
    let month = i64::from(month);
    let day = i64::from(day);
    let a = (month - 14) / 12;

    (1461 * (year + 4800 + a)) / 4 + (367 * (month - 2 - 12 * a)) / 12
        - (3 * ((year + 4900 + a) / 100)) / 4
        + day
        - 32075
}

/// Convert an integer Julian Day Number back to (year, month, day)
///
/// See the Explanatory Supplement to the Astronomical Almanac 15.11.
pub fn calendar_date(jdn: i64) -> (i32, u32, u32) {
    let f = jdn + 1401 + (4 * jdn + 274_277) / 146_097 * 3 / 4 - 38;
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;

    (year as i32, month as u32, day as u32)
}

/// Days since 2000 January 0.0 UT (1999-12-31T00:00:00Z), including the
/// fraction of the day
///
/// This is the day count used by the orbital-element models of the Moon
/// and planets in Paul Schlyter's "How to compute planetary positions".
pub fn day_number_2000<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let utc = dt.with_timezone(&Utc);
    let y = utc.year();
    let m = utc.month() as i32;
    let d = utc.day() as i32;

    let days = 367 * y - 7 * (y + (m + 9) / 12) / 4 - 3 * ((y + (m - 9) / 7) / 100 + 1) / 4
        + 275 * m / 9
        + d
        - 730_515;

    f64::from(days)
        + f64::from(utc.hour()) / 24.0
        + f64::from(utc.minute()) / (24.0 * 60.0)
        + f64::from(utc.second()) / (24.0 * 60.0 * 60.0)
}

/// Format an integer Julian Day Number as a calendar date string (YYYY-MM-DD)
pub fn format_date(jdn: i64) -> String {
    let (year, month, day) = calendar_date(jdn);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_julian_day_conversion() {
        assert_eq!(julian_day_number(2000, 1, 1), 2451545);
        assert_eq!(julian_day_number(2020, 1, 1), 2458850);
        assert_eq!(julian_day_number(1969, 7, 20), 2440423);
        assert_eq!(julian_day_number(1900, 1, 1), 2415021);
        assert_eq!(julian_day_number(1970, 1, 1), 2440588);
    }

    #[test]
    fn test_calendar_date_conversion() {
        assert_eq!(calendar_date(2451545), (2000, 1, 1));
        assert_eq!(calendar_date(2458850), (2020, 1, 1));
        assert_eq!(calendar_date(2440423), (1969, 7, 20));
        assert_eq!(calendar_date(2415021), (1900, 1, 1));
    }

    #[test]
    fn test_day_number_roundtrip_over_leap_years() {
        for jdn in 2415021..2415021 + 4 * 366 {
            let (y, m, d) = calendar_date(jdn);
            assert_eq!(julian_day_number(y, m, d), jdn, "failed for {}", jdn);
        }
    }

    #[test]
    fn test_day_number_2000() {
        // Day zero is 1999-12-31 at midnight UT
        let start = Utc.with_ymd_and_hms(1999, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(day_number_2000(&start), 0.0);

        // Schlyter's worked example: 1990 April 19, 0:00 UT is day -3543
        let example = Utc.with_ymd_and_hms(1990, 4, 19, 0, 0, 0).unwrap();
        assert_eq!(day_number_2000(&example), -3543.0);

        let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(day_number_2000(&noon), 1.5);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(2451545), "2000-01-01");
    }
}
