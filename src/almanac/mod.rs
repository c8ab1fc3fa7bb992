//! Sunrise and sunset
//!
//! Closed-form sunrise equation: mean solar time, equation of centre,
//! ecliptic longitude and solar transit, then the hour angle at which the
//! Sun's centre is 0.833 degrees below the horizon (standard refraction
//! plus the solar semi-diameter). Times are good to a minute or two at mid
//! latitudes.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use radiosky::almanac::{sunrise, SunriseSunset};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
//! let events = sunrise(date, 80.0, 0.0).unwrap();
//! assert_eq!(events, SunriseSunset::PolarNight);
//! ```

use crate::constants::{DAY_S, DEG2RAD, J2000, RAD2DEG};
use crate::coordinates::angle::wrap_degrees;
use crate::time::{julian_date, julian_date_to_datetime};
use crate::{RadioskyError, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use log::warn;

/// TT - UTC in seconds used to centre the day count
const TT_MINUS_UTC_S: f64 = 69.184;
/// Altitude of the Sun's centre at rise and set, degrees
const HORIZON_ALTITUDE_DEG: f64 = -0.833;
/// Obliquity of the ecliptic used by the sunrise equation, degrees
const OBLIQUITY_DEG: f64 = 23.4397;

/// Outcome of the sunrise equation for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunriseSunset {
    /// The Sun rises and sets
    RiseAndSet {
        rise: DateTime<Utc>,
        set: DateTime<Utc>,
    },
    /// The Sun stays above the horizon all day
    PolarDay,
    /// The Sun stays below the horizon all day
    PolarNight,
}

/// Julian date of solar transit and the Sun's declination (radians)
fn transit_and_declination(date: NaiveDate, longitude: f64) -> (f64, f64) {
    let midnight = julian_date(date.year(), date.month(), date.day(), 0, 0, 0);
    let n = (midnight - J2000 + TT_MINUS_UTC_S / DAY_S).ceil();

    // Mean solar time
    let j_star = n - longitude / 360.0;

    let m = wrap_degrees(357.5291 + 0.985_600_28 * j_star);
    let m_rad = m * DEG2RAD;

    // Equation of the centre
    let c = 1.9148 * m_rad.sin() + 0.02 * (2.0 * m_rad).sin() + 0.0003 * (3.0 * m_rad).sin();

    // Ecliptic longitude, with the argument of perihelion 102.9372
    let lambda_rad = wrap_degrees(m + c + 180.0 + 102.9372) * DEG2RAD;

    let j_transit = J2000 + j_star + 0.0053 * m_rad.sin() - 0.0069 * (2.0 * lambda_rad).sin();
    let declination = (lambda_rad.sin() * (OBLIQUITY_DEG * DEG2RAD).sin()).asin();

    (j_transit, declination)
}

/// Time of local solar noon on `date` at East-positive `longitude`
pub fn solar_transit(date: NaiveDate, longitude: f64) -> Result<DateTime<Utc>> {
    let (j_transit, _) = transit_and_declination(date, longitude);
    Ok(julian_date_to_datetime(j_transit)?)
}

/// Sunrise and sunset on the UTC day `date` at latitude and East-positive
/// longitude in degrees
///
/// Inside the polar circles the Sun may not cross the horizon; that is
/// reported as [`SunriseSunset::PolarDay`] or [`SunriseSunset::PolarNight`]
/// rather than clamped to a rise/set time.
pub fn sunrise(date: NaiveDate, latitude: f64, longitude: f64) -> Result<SunriseSunset> {
    let (j_transit, declination) = transit_and_declination(date, longitude);

    let lat_rad = latitude * DEG2RAD;
    let cos_omega = ((HORIZON_ALTITUDE_DEG * DEG2RAD).sin() - lat_rad.sin() * declination.sin())
        / (lat_rad.cos() * declination.cos());

    if cos_omega.is_nan() {
        return Err(RadioskyError::Calculation(format!(
            "sunrise hour angle undefined at latitude {} on {}",
            latitude, date
        )));
    }
    if cos_omega < -1.0 {
        warn!("No sunset at latitude {} on {}: polar day", latitude, date);
        return Ok(SunriseSunset::PolarDay);
    }
    if cos_omega > 1.0 {
        warn!("No sunrise at latitude {} on {}: polar night", latitude, date);
        return Ok(SunriseSunset::PolarNight);
    }

    let omega0 = cos_omega.acos() * RAD2DEG;

    Ok(SunriseSunset::RiseAndSet {
        rise: julian_date_to_datetime(j_transit - omega0 / 360.0)?,
        set: julian_date_to_datetime(j_transit + omega0 / 360.0)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::utc_datetime;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_close(actual: DateTime<Utc>, expected: DateTime<Utc>, tolerance_s: i64) {
        let diff = (actual - expected).num_seconds().abs();
        assert!(diff <= tolerance_s, "{} differs from {} by {}s", actual, expected, diff);
    }

    #[rstest]
    // Greenwich, midsummer and midwinter
    #[case(date(2024, 6, 21), 51.4779, -0.0015, (2024, 6, 21, 3, 42, 47), (2024, 6, 21, 20, 20, 50))]
    #[case(date(2024, 12, 21), 51.4779, -0.0015, (2024, 12, 21, 8, 3, 19), (2024, 12, 21, 15, 53, 6))]
    // Equinox on the equator
    #[case(date(2023, 3, 20), 0.0, 0.0, (2023, 3, 20, 6, 4, 17), (2023, 3, 20, 18, 10, 57))]
    // New York
    #[case(date(2023, 3, 20), 40.7128, -74.006, (2023, 3, 20, 10, 59, 58), (2023, 3, 20, 23, 7, 12))]
    // Sydney rises on the previous UTC day
    #[case(date(2023, 3, 20), -33.8688, 151.2093, (2023, 3, 19, 19, 57, 38), (2023, 3, 20, 8, 8, 12))]
    fn test_rise_and_set(
        #[case] day: NaiveDate,
        #[case] latitude: f64,
        #[case] longitude: f64,
        #[case] rise: (i32, u32, u32, u32, u32, u32),
        #[case] set: (i32, u32, u32, u32, u32, u32),
    ) {
        let expected_rise = utc_datetime(rise.0, rise.1, rise.2, rise.3, rise.4, rise.5).unwrap();
        let expected_set = utc_datetime(set.0, set.1, set.2, set.3, set.4, set.5).unwrap();

        match sunrise(day, latitude, longitude).unwrap() {
            SunriseSunset::RiseAndSet { rise, set } => {
                assert_close(rise, expected_rise, 2);
                assert_close(set, expected_set, 2);
                assert!(rise < set);
            }
            other => panic!("expected rise and set, got {:?}", other),
        }
    }

    #[test]
    fn test_polar_cases() {
        assert_eq!(sunrise(date(2024, 12, 21), 80.0, 0.0).unwrap(), SunriseSunset::PolarNight);
        assert_eq!(sunrise(date(2024, 6, 21), 80.0, 0.0).unwrap(), SunriseSunset::PolarDay);
        assert_eq!(sunrise(date(2024, 6, 21), -80.0, 0.0).unwrap(), SunriseSunset::PolarNight);
    }

    #[test]
    fn test_transit_near_noon_at_greenwich() {
        let noon = solar_transit(date(2024, 6, 21), 0.0).unwrap();
        let reference = utc_datetime(2024, 6, 21, 12, 0, 0).unwrap();
        // Equation of time stays within about 17 minutes
        assert_close(noon, reference, 17 * 60);
    }

    #[test]
    fn test_non_finite_latitude_is_an_error() {
        assert!(matches!(
            sunrise(date(2024, 6, 21), f64::NAN, 0.0),
            Err(RadioskyError::Calculation(_))
        ));
    }
}
